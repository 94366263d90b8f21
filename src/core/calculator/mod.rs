pub mod shift;
