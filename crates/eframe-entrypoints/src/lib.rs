//! Entry points for the route planner's eframe application
//!
//! This crate keeps the platform plumbing (logging setup, Tokio runtime,
//! window options, Android activity hookup, CLI parsing) out of the
//! application crate.
//!
//! # Usage
//!
//! In the application's `lib.rs`:
//!
//! ```ignore
//! eframe_entrypoints::eframe_app!("Route Planner", |cc| Box::new(MyApp::new(cc)));
//! ```
//!
//! and in `main.rs`:
//!
//! ```ignore
//! fn main() {
//!     my_app::run_native();
//! }
//! ```

pub mod cli;
pub mod logging;
mod metadata;

pub use cli::{parse_args, parse_args_from};
pub use logging::setup_logging;
pub use metadata::{log_version_info, short_version_info};

// Re-export eframe types commonly needed for app creation
pub use eframe;
pub use eframe::CreationContext;

/// Default native window size in logical pixels
pub const DEFAULT_WINDOW_SIZE: [f32; 2] = [1280.0, 720.0];

/// Define the platform entry points for an eframe application.
///
/// * `$app_name` - string literal used for the window title and logs
/// * `$app_creator` - closure taking `&CreationContext` and returning `Box<dyn eframe::App>`
///
/// Generates `android_main` on Android and `run_native()` everywhere else.
/// The version logged at startup is the calling crate's package version.
#[macro_export]
macro_rules! eframe_app {
    ($app_name:expr, $app_creator:expr) => {
        #[cfg(target_os = "android")]
        #[unsafe(no_mangle)] // SAFETY: there is no other global function of this name
        pub fn android_main(app: ::winit::platform::android::activity::AndroidApp) {
            $crate::android_main_impl($app_name, env!("CARGO_PKG_VERSION"), app, $app_creator);
        }

        /// Run the application on native (desktop) platforms.
        #[cfg(not(target_arch = "wasm32"))]
        pub fn run_native() {
            let rt = ::tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .expect("Failed to create Tokio runtime");

            rt.block_on(async {
                $crate::native_main_impl($app_name, env!("CARGO_PKG_VERSION"), $app_creator)
                    .await;
            });
        }
    };
}

/// Android entry point implementation; use [`eframe_app!`] instead.
#[cfg(target_os = "android")]
#[doc(hidden)]
pub fn android_main_impl(
    app_name: &str,
    version: &str,
    app: winit::platform::android::activity::AndroidApp,
    app_creator: impl FnOnce(&eframe::CreationContext<'_>) -> Box<dyn eframe::App> + Send + 'static,
) {
    use winit::platform::android::EventLoopBuilderExtAndroid;

    android_logger::init_once(
        android_logger::Config::default().with_max_level(log::LevelFilter::Info),
    );
    log_version_info(app_name, version);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_title(app_name),
        event_loop_builder: Some(Box::new(move |builder| {
            builder.with_android_app(app);
        })),
        ..Default::default()
    };

    if let Err(err) = eframe::run_native(
        app_name,
        native_options,
        Box::new(move |cc| Ok(app_creator(cc))),
    ) {
        log::error!("{app_name} exited with an error: {err}");
    }
}

/// Desktop entry point implementation; use [`eframe_app!`] instead.
#[cfg(not(target_arch = "wasm32"))]
#[doc(hidden)]
pub async fn native_main_impl(
    app_name: &str,
    version: &str,
    app_creator: impl FnOnce(&eframe::CreationContext<'_>) -> Box<dyn eframe::App>,
) {
    // Must run before anything logs
    setup_logging();
    log_version_info(app_name, version);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(DEFAULT_WINDOW_SIZE)
            .with_min_inner_size([360.0, 480.0])
            .with_title(app_name),
        ..Default::default()
    };

    if let Err(err) = eframe::run_native(
        app_name,
        native_options,
        Box::new(move |cc| Ok(app_creator(cc))),
    ) {
        tracing::error!("{app_name} exited with an error: {err}");
    }
}
