pub mod nominatim;

pub use self::nominatim::Nominatim;
