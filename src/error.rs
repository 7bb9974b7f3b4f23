error_chain! {
    foreign_links {
        Io(::std::io::Error);
        Config(::config::ConfigError);
        Json(::serde_json::error::Error);
    }
    errors {
        InvalidPath(p: String) {
            description("invalid mount path")
            display("Invalid mount path: {}", p)
        }
        Launch(m: String) {
            description("launch failed")
            display("Failed to launch server: {}", m)
        }
    }
}
