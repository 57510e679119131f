pub mod pip;
