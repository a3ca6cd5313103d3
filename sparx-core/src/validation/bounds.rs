//! Array bounds and alignment validation
//!
//! Pure checks run before a raw byte region is viewed as a typed array.

use crate::SparxError;

/// Validate array bounds for a given element type
///
/// Returns the element count for a region of `byte_len` bytes, rejecting
/// lengths that are not a whole number of elements.
pub const fn validate_array_bounds<T>(byte_len: usize) -> Result<usize, SparxError> {
    let element_size = core::mem::size_of::<T>();

    if element_size == 0 || byte_len % element_size != 0 {
        return Err(SparxError::ArrayAlignment);
    }

    let count = byte_len / element_size;

    // Keep headroom so position arithmetic downstream cannot overflow
    if count > usize::MAX / 8 {
        return Err(SparxError::ArraySizeOverflow);
    }

    Ok(count)
}

/// Validate alignment for a pointer to typed data
///
/// Pure address arithmetic; the pointer is never dereferenced.
pub fn validate_alignment<T>(ptr: *const u8) -> Result<(), SparxError> {
    let alignment = core::mem::align_of::<T>();

    if (ptr as usize) % alignment != 0 {
        return Err(SparxError::ArrayAlignment);
    }

    Ok(())
}

/// Validate that a byte slice can be viewed as a typed array
///
/// Combines length and alignment validation.
pub fn validate_typed_slice<T>(data: &[u8]) -> Result<usize, SparxError> {
    validate_alignment::<T>(data.as_ptr())?;
    validate_array_bounds::<T>(data.len())
}

/// Validate that `offset..offset + len` fits inside `total`
pub const fn validate_region(offset: usize, len: usize, total: usize) -> Result<(), SparxError> {
    match offset.checked_add(len) {
        Some(end) if end <= total => Ok(()),
        Some(_) => Err(SparxError::backing_store(offset, "region extends past end of store")),
        None => Err(SparxError::ArraySizeOverflow),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_array_bounds() {
        assert_eq!(validate_array_bounds::<u32>(16), Ok(4));
        assert_eq!(validate_array_bounds::<u64>(24), Ok(3));

        assert_eq!(
            validate_array_bounds::<u32>(15),
            Err(SparxError::ArrayAlignment)
        );
        assert_eq!(
            validate_array_bounds::<u64>(23),
            Err(SparxError::ArrayAlignment)
        );

        // Empty arrays are valid
        assert_eq!(validate_array_bounds::<u32>(0), Ok(0));
    }

    #[test]
    fn test_validate_alignment() {
        let aligned_data: [u64; 4] = [0; 4];
        let ptr = aligned_data.as_ptr() as *const u8;

        assert_eq!(validate_alignment::<u64>(ptr), Ok(()));
        assert_eq!(validate_alignment::<u32>(ptr), Ok(()));

        let unaligned_ptr = ptr.wrapping_add(1);
        assert_eq!(
            validate_alignment::<u64>(unaligned_ptr),
            Err(SparxError::ArrayAlignment)
        );
    }

    #[test]
    fn test_validate_region() {
        assert_eq!(validate_region(0, 8, 8), Ok(()));
        assert_eq!(validate_region(4, 0, 4), Ok(()));
        assert!(matches!(
            validate_region(4, 8, 8),
            Err(SparxError::BackingStoreFailure { offset: 4, .. })
        ));
        assert_eq!(
            validate_region(usize::MAX, 2, 8),
            Err(SparxError::ArraySizeOverflow)
        );
    }
}
