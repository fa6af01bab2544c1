// Copyright @yucwang 2021

pub mod mis;
pub mod path;
