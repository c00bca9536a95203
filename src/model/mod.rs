mod message;

pub use message::{ContactForm, Message, NewMessage, DEFAULT_SUBJECT};
