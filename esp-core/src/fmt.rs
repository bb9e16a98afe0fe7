//! Logging-Shim
//!
//! Mit Feature `defmt` werden die Makros an defmt weitergereicht,
//! ohne Feature (Host-Tests) werden die Argumente nur ausgewertet.
//! Über `#[macro_use]` in `lib.rs` sind die Makros in allen Modulen sichtbar.

#![allow(unused_macros)]

macro_rules! info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::info!($($arg)*);
        #[cfg(not(feature = "defmt"))]
        let _ = (fmt_ignore!($($arg)*));
    }};
}

macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($($arg)*);
        #[cfg(not(feature = "defmt"))]
        let _ = (fmt_ignore!($($arg)*));
    }};
}

macro_rules! warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::warn!($($arg)*);
        #[cfg(not(feature = "defmt"))]
        let _ = (fmt_ignore!($($arg)*));
    }};
}

// Wertet die Format-Argumente aus, damit keine "unused variable" Warnungen entstehen
macro_rules! fmt_ignore {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        $( let _ = &$arg; )*
    }};
}

