//! Error types for the library.
//!
//! Other modules `use crate::errors::*;` to get the `Error`, `ErrorKind`, `ResultExt` and `Result`
//! types that `error_chain!` creates.

use error_chain::error_chain;

error_chain! {

    foreign_links {
        Io(::std::io::Error);
        Image(::image::ImageError);
    }

    errors {
        InvalidGridDimensions(rows: usize, columns: usize) {
            description("invalid grid dimensions")
            display("a grid needs at least one row and one column, got {} x {}", rows, columns)
        }

        InvalidLayout(reason: String) {
            description("invalid canvas layout")
            display("invalid canvas layout: {}", reason)
        }
    }
}
