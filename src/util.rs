#[inline(always)]
#[cold]
pub(crate) fn cold_path() {}

pub trait ByteOrder: zerocopy::ByteOrder + Send + Sync + 'static {}

impl<T: zerocopy::ByteOrder + Send + Sync + 'static> ByteOrder for T {}

/// Narrows an integer read from the wire to the width the traversal routine
/// asked for.
pub(crate) fn narrow<S, T>(value: S, target: &'static str) -> crate::Result<T>
where
    S: Copy + std::fmt::Display,
    T: TryFrom<S>,
{
    T::try_from(value).map_err(|_| {
        cold_path();
        crate::Error::out_of_range(value, target)
    })
}
