mod boot;
mod config;
mod controller;
mod grid;
mod image_loader;
mod input;
mod lazy_images;
mod scroll_lock;
mod view;

fn main() {
    match boot::start() {
        // Listeners live for the whole page.
        Ok(page) => std::mem::forget(page),
        Err(err) => {
            gloo::console::error!("photowall failed to start", err.to_string());
        }
    }
}
