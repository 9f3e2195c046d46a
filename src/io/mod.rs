pub(crate) mod list_file;
