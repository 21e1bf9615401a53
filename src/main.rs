use log::{error, info};

mod app;
mod config;
mod dom;
mod hero;
mod intro;
mod nav;
mod scroll_router;
mod timing;

mod effects {
    pub mod parallax;
    pub mod reveal;
}

mod contact {
    pub mod emailjs;
    pub mod form;
}

mod components {
    pub mod mobile_menu;
}

#[cfg(test)]
mod testing;

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting page script");
    if let Err(e) = app::start() {
        error!("Page script failed to start: {:?}", e);
    }
}
