mod common;
mod lexicon;
