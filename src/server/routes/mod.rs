//! HTTP routes for the trayserve server

pub mod health;
pub mod static_files;

use std::path::PathBuf;

use warp::Filter;

/// Create all server routes.
///
/// Real files win over everything: the health probe and the directory-listing
/// fallback only answer when no file resolves for the path.
pub fn create_routes(
    root: PathBuf,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    static_files::create_static_routes(root)
        .or(health::create_health_route())
}
