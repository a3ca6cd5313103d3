//! Point-sampling interface exposed to downstream consumers
//!
//! Consumers treat an implementor exactly like a dense array: move to a
//! coordinate, read a value. Sparsity only shows through the fill value and
//! through performance.

use crate::error::Result;

/// Cursor over an n-dimensional dense view
pub trait PointSampler {
    /// Element type produced by [`PointSampler::get`]
    type Element: Copy;

    /// Number of axes of the addressed space
    fn num_dimensions(&self) -> usize;

    /// Current coordinate
    fn position(&self) -> &[i64];

    /// Read the value at the current coordinate
    fn get(&mut self) -> Result<Self::Element>;

    /// Step one position forward along axis `d`
    fn fwd(&mut self, d: usize);

    /// Step one position backward along axis `d`
    fn bck(&mut self, d: usize);

    /// Move by `distance` along axis `d`
    fn move_axis(&mut self, distance: i64, d: usize);

    /// Move by a per-axis offset
    fn move_by(&mut self, distance: &[i64]);

    /// Jump to an absolute coordinate
    fn set_position(&mut self, position: &[i64]);

    /// Set the coordinate on one axis
    fn set_axis(&mut self, position: i64, d: usize);

    /// Independent sampler starting at the same coordinate
    fn duplicate(&self) -> Self
    where
        Self: Sized;

    /// Jump to `position` and read the value there
    fn get_at(&mut self, position: &[i64]) -> Result<Self::Element> {
        self.set_position(position);
        self.get()
    }
}
