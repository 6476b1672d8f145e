// src/macros.rs

/// `s!()` → empty String, `s!(x)` → `String::from(x)`.
#[macro_export]
macro_rules! s {
    () => {
        ::std::string::String::new()
    };
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

/// `strings!["a", "b"]` → `Vec<String>`; used for header rows.
#[macro_export]
macro_rules! strings {
    ($($item:expr),* $(,)?) => {
        ::std::vec![$(::std::string::String::from($item)),*]
    };
}
