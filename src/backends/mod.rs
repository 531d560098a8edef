//! Secret backend implementations.

#[cfg(feature = "mock")]
pub mod mock;

#[cfg(feature = "azure")]
pub mod azure;

/// Registers all compiled backends with the factory.
///
/// This is called by [`crate::init`], but can also be called explicitly.
pub fn register_all() {
    #[cfg(feature = "mock")]
    mock::register();

    #[cfg(feature = "azure")]
    azure::register();
}
