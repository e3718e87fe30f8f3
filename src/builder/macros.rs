//! Macros for ergonomic state declarations.

/// Declare an enum of states with dense ids and a `StateSet` implementation.
///
/// Variants are numbered from zero in declaration order. The enum also
/// converts into `StateId`, so it can be passed straight to the table
/// builder and to `TransitionEngine::do_transition`.
///
/// # Example
///
/// ```
/// use turnstile::core::StateSet;
/// use turnstile::state_ids;
///
/// state_ids! {
///     pub enum EditState {
///         NoState,
///         ReadOnly,
///         Add,
///         Update,
///     }
/// }
///
/// assert_eq!(EditState::COUNT, 4);
/// assert_eq!(EditState::Add.id(), 2);
/// assert_eq!(EditState::from_id(3), Some(EditState::Update));
/// assert_eq!(usize::from(EditState::ReadOnly), 1);
/// ```
#[macro_export]
macro_rules! state_ids {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        #[repr(usize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every state, ordered by id.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];
        }

        impl $crate::core::StateSet for $name {
            const COUNT: usize = Self::ALL.len();

            fn all() -> &'static [Self] {
                Self::ALL
            }

            fn id(self) -> $crate::core::StateId {
                self as $crate::core::StateId
            }

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }

        impl ::core::convert::From<$name> for $crate::core::StateId {
            fn from(state: $name) -> Self {
                state as $crate::core::StateId
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str($crate::core::StateSet::name(*self))
            }
        }
    };
}
