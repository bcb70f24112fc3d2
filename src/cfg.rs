#[doc(hidden)]
#[macro_export]
macro_rules! cfg_sync {
    ($($item:item)*) => {
        $( #[cfg(feature = "sync")] $item )*
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! cfg_json {
    ($($item:item)*) => {
        $( #[cfg(feature = "json")] $item )*
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! cfg_uuid {
    ($($item:item)*) => {
        $( #[cfg(feature = "uuid")] $item )*
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! cfg_chrono {
    ($($item:item)*) => {
        $( #[cfg(feature = "chrono")] $item )*
    }
}
