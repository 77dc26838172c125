//! Third-party search APIs.

pub mod yelp;
