//! Typed domain separators for canonical hashing.
//!
//! Every digest in the workspace selects a domain via [`HashDomain`], so the
//! same bytes hashed for two different purposes never produce the same
//! digest. Adding a domain is a single line in the macro invocation below.

/// Declares `HashDomain`, `as_bytes()`, `ALL`, and `Display` from one list.
macro_rules! define_hash_domains {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident => $bytes:expr
        ),+ $(,)?
    ) => {
        /// Typed domain separator for [`crate::hash::canonical_hash`].
        ///
        /// Every variant maps to a unique, null-terminated byte string used
        /// as a SHA-256 prefix.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum HashDomain {
            $(
                $(#[$meta])*
                $variant,
            )+
        }

        impl HashDomain {
            /// The raw domain-separator bytes (null-terminated).
            #[must_use]
            pub const fn as_bytes(&self) -> &'static [u8] {
                match self {
                    $( Self::$variant => $bytes, )+
                }
            }

            /// All domain variants in declaration order.
            pub const ALL: &[HashDomain] = &[
                $( Self::$variant, )+
            ];
        }

        impl core::fmt::Display for HashDomain {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                match self {
                    $( Self::$variant => write!(f, stringify!($variant)), )+
                }
            }
        }
    };
}

define_hash_domains! {
    /// Canonical state key fingerprints (closed-set identity, audit logs).
    StateKey => b"PATHWISE::STATE_KEY::V1\0",

    /// Search graph canonical JSON.
    SearchGraph => b"PATHWISE::SEARCH_GRAPH::V1\0",

    /// Individual run-report artifact content.
    ReportArtifact => b"PATHWISE::REPORT_ARTIFACT::V1\0",

    /// Run-report digest over the normative projection.
    ReportDigest => b"PATHWISE::REPORT_DIGEST::V1\0",

    /// Harness run configuration.
    RunConfig => b"PATHWISE::RUN_CONFIG::V1\0",
}
