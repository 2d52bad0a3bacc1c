mod translate;

pub use translate::translate_window_event;
