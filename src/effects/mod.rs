pub(crate) mod fx;
pub(crate) mod watermark;
