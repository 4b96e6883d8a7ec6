pub(crate) mod slide;
