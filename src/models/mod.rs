pub mod artist;
pub mod like;
pub mod review;
pub mod venue;
