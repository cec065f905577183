pub mod day16;
