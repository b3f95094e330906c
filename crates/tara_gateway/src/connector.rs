pub mod tara;

pub use self::tara::Tara;
