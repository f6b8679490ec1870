//! Mount decisions, independent of the browser
//!
//! [`launch`] decides whether a container gets a live surface or keeps its
//! static background. The browser layer supplies the container and a surface
//! factory; tests supply fakes.

use std::future::Future;

use crate::error::{PlasmaError, PlasmaStatus};

/// The element a plasma surface is mounted into
pub trait PlasmaContainer {
    type Surface;

    /// Whether the user asked the system to minimise motion
    fn prefers_reduced_motion(&self) -> bool;

    /// Record a fallback marker on the element
    fn set_marker(&mut self, marker: &'static str);

    /// Put a freshly created surface on screen
    fn attach(&mut self, surface: &Self::Surface) -> Result<(), PlasmaError>;

    /// Surface a setup failure to the developer
    fn report(&mut self, error: &PlasmaError);
}

/// Create and attach a surface, or settle on a fallback status
///
/// Reduced motion skips the factory entirely. Every other failure is reported
/// once, and the container is marked when the status carries a marker.
pub async fn launch<C, F, Fut>(container: &mut C, create_surface: F) -> Result<C::Surface, PlasmaStatus>
where
    C: PlasmaContainer,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<C::Surface, PlasmaError>>,
{
    if container.prefers_reduced_motion() {
        let status = PlasmaStatus::ReducedMotion;
        if let Some(marker) = status.marker() {
            container.set_marker(marker);
        }
        return Err(status);
    }

    let attached = match create_surface().await {
        Ok(surface) => container.attach(&surface).map(|()| surface),
        Err(e) => Err(e),
    };

    attached.map_err(|e| {
        let status = PlasmaStatus::from(&e);
        if let Some(marker) = status.marker() {
            container.set_marker(marker);
        }
        container.report(&e);
        status
    })
}

/// Run `attempt` for each candidate in order until one succeeds
///
/// Returns the last error when every candidate fails.
pub async fn first_available<K, T, F, Fut>(candidates: &[K], mut attempt: F) -> Result<T, PlasmaError>
where
    K: Copy,
    F: FnMut(K) -> Fut,
    Fut: Future<Output = Result<T, PlasmaError>>,
{
    let mut last = PlasmaError::Unsupported("no graphics backend to try".to_string());
    for &candidate in candidates {
        match attempt(candidate).await {
            Ok(value) => return Ok(value),
            Err(e) => last = e,
        }
    }
    Err(last)
}
