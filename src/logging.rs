//! Logging facade.
//!
//! On wasm32 targets we mirror the teacher's direct `web_sys::console` calls
//! (see the original `lib.rs::init`); elsewhere we go through the `log` crate,
//! which the CLI driver wires up to `env_logger`.

#[cfg(target_arch = "wasm32")]
pub fn warn(msg: &str) {
    web_sys::console::warn_1(&msg.into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn warn(msg: &str) {
    log::warn!("{msg}");
}

#[cfg(target_arch = "wasm32")]
pub fn error(msg: &str) {
    web_sys::console::error_1(&msg.into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn error(msg: &str) {
    log::error!("{msg}");
}

#[cfg(target_arch = "wasm32")]
pub fn info(msg: &str) {
    web_sys::console::log_1(&msg.into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn info(msg: &str) {
    log::info!("{msg}");
}
