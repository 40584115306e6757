pub mod decode;
pub mod info;
pub mod ipv4;
