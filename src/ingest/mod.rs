/// Upstream data source clients.
///
/// One file per provider: URL construction, JSON parsing, and a fetch
/// wrapper that degrades to a documented neutral default on failure
/// (except directions, where failure is terminal for the request).

pub mod directions;
pub mod nws;
pub mod usgs;

#[cfg(test)]
pub(crate) mod fixtures;
