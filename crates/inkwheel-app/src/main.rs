//! Main application entry point.

fn main() {
    env_logger::init();
    log::info!("Starting InkWheel");

    if let Err(e) = pollster::block_on(inkwheel_app::App::run()) {
        log::error!("InkWheel exited with an error: {}", e);
        std::process::exit(1);
    }
}
