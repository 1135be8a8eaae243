use word_galaxy_engine::create_app;

fn main() {
    let mut app = match create_app() {
        Ok(app) => app,
        Err(error) => {
            report_startup_error(&error);
            return;
        }
    };

    #[cfg(target_arch = "wasm32")]
    {
        wasm_bindgen_futures::spawn_local(async move {
            app.run();
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.run();
    }
}

fn report_startup_error(error: &word_galaxy_engine::GalaxyError) {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::console::error_1(&format!("word-galaxy-engine: {}", error).into());
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        eprintln!("word-galaxy-engine: {}", error);
        std::process::exit(1);
    }
}
