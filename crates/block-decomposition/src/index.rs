macro_rules! make_index {
    ($vis:vis $name:ident) => {
        /// Dense index backed by a `u32`.
        #[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
        $vis struct $name(u32);

        impl $name {
            /// Creates an index from a `usize`.
            #[inline(always)]
            $vis fn new(x: usize) -> Self {
                debug_assert!(x < u32::MAX as usize);
                Self(x as u32)
            }

            /// The index as a `usize`.
            #[inline(always)]
            $vis fn index(&self) -> usize {
                self.0 as usize
            }

            /// Sentinel index, larger than every valid one.
            #[inline(always)]
            #[allow(unused)]
            $vis fn end() -> Self {
                Self(u32::MAX)
            }
        }

        impl ::std::default::Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::end()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

pub(crate) use make_index;
