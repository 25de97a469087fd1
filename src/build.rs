mod builder;
mod document;
mod feed;
mod item;
mod paths;
mod source;

pub use builder::Builder;
