#![allow(dead_code)]

pub mod logs {
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing::Level;
    use tracing_subscriber::fmt::MakeWriter;

    /// In-memory sink for a scoped JSON subscriber
    #[derive(Clone, Default)]
    pub struct CapturedLogs {
        buf: Arc<Mutex<Vec<u8>>>,
    }

    impl CapturedLogs {
        pub fn contents(&self) -> String {
            String::from_utf8_lossy(&self.buf.lock().unwrap()).into_owned()
        }
    }

    pub struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CaptureWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CaptureWriter;

        fn make_writer(&'a self) -> Self::Writer {
            CaptureWriter(Arc::clone(&self.buf))
        }
    }

    /// Run `f` with a thread-local subscriber and return its output as JSON lines.
    pub fn capture<R>(level: Level, f: impl FnOnce() -> R) -> (R, String) {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_max_level(level)
            .without_time()
            .with_writer(logs.clone())
            .finish();
        let out = tracing::subscriber::with_default(subscriber, f);
        (out, logs.contents())
    }

    /// Lines whose message is exactly `message`
    pub fn events<'l>(output: &'l str, message: &str) -> Vec<&'l str> {
        let needle = format!("\"message\":\"{message}\"");
        output.lines().filter(|line| line.contains(&needle)).collect()
    }
}

pub mod fixtures {
    use brrtdispatch::{RouteTable, Router};

    /// The pet store used across integration tests
    pub fn install_pet_store<T: RouteTable<Handler = &'static str>>(table: &mut T) {
        for (pattern, method, handler) in [
            ("/pets", "GET", "list_pets"),
            ("/pets", "POST", "add_pet"),
            ("/pets/:id", "GET", "get_pet"),
            ("/pets/:id", "PUT", "update_pet"),
            ("/pets/:id", "DELETE", "delete_pet"),
            ("/pets/search", "GET", "search_pets"),
            ("/users/:user_id/pets/:pet_id", "GET", "get_user_pet"),
            ("/users/:user_id/pets/favorites", "GET", "get_user_favorites"),
            ("/health", "GET", "health"),
        ] {
            table.register(pattern, method, handler);
        }
    }

    pub fn pet_store() -> Router<&'static str> {
        let mut router = Router::new();
        install_pet_store(&mut router);
        router
    }
}
