/*!
Implementations of the [`value`][crate::value] traits for various primitive
and standard library types
 */

use std::{hash::Hash, path::Path};

use crate::value::{Collection, DecodeError, ParsedValue, Value};

macro_rules! from_str {
    ($(
        $type:ident $($(::$path:ident)*,)?
    )*) => {
        $(
            impl ParsedValue for $type $($(:: $path)*)? {}
        )*
    };
}

from_str! {
    u8 u16 u32 u64 u128 usize
    i8 i16 i32 i64 i128 isize
    f32 f64
    char

    std::string::String,
    std::path::PathBuf,
    std::ffi::OsString,

    core::net::Ipv4Addr,
    core::net::Ipv6Addr,
    core::net::IpAddr,
    core::net::SocketAddrV4,
    core::net::SocketAddrV6,
    core::net::SocketAddr,
}

impl<'arg> Value<'arg> for &'arg str {
    #[inline]
    fn from_arg(arg: &'arg str) -> Result<Self, DecodeError> {
        Ok(arg)
    }
}

impl<'arg> Value<'arg> for &'arg Path {
    #[inline]
    fn from_arg(arg: &'arg str) -> Result<Self, DecodeError> {
        Ok(Path::new(arg))
    }
}

macro_rules! collections {
    (
        $($type:ident $(:: $path:ident)* [T $(: $($bounds:tt)+)?] .$insert:ident),+ $(,)?
    ) => {
        $(
            impl<T $(: $($bounds)+)?> Collection for std:: $type $(::$path)* <T> {
                type Item = T;

                #[inline]
                fn add(&mut self, item: T) {
                    self.$insert(item);
                }
            }
        )+
    }
}

collections! {
    vec::Vec[T] .push,
    collections::BTreeSet[T: Ord] .insert,
    collections::BinaryHeap[T: Ord] .push,
    collections::HashSet[T: Eq + Hash] .insert,
    collections::LinkedList[T] .push_back,
    collections::VecDeque[T] .push_back,
}

#[cfg(test)]
mod tests {
    use std::{
        collections::{BTreeSet, VecDeque},
        ffi::OsString,
        net::Ipv4Addr,
        path::PathBuf,
    };

    use claimant_lexer::Arg;

    use crate::value::RawValue;

    use super::*;

    fn decode<'a, T: RawValue<'a>>(arg: &'a str) -> Result<T, DecodeError> {
        T::from_arg(Arg::new(arg.as_bytes()))
    }

    #[test]
    fn std_types() {
        assert_eq!(decode::<usize>("12"), Ok(12));
        assert_eq!(decode::<PathBuf>("a/b"), Ok(PathBuf::from("a/b")));
        assert_eq!(decode::<OsString>("os"), Ok(OsString::from("os")));
        assert_eq!(
            decode::<Ipv4Addr>("127.0.0.1"),
            Ok(Ipv4Addr::new(127, 0, 0, 1))
        );
        assert_eq!(decode::<&Path>("a/b"), Ok(Path::new("a/b")));
    }

    #[test]
    fn collections_keep_insertion_semantics() {
        let mut list = VecDeque::new();
        list.add(2);
        list.add(1);
        assert_eq!(list, [2, 1]);

        let mut set = BTreeSet::new();
        set.add("b");
        set.add("a");
        set.add("b");
        assert_eq!(set.into_iter().collect::<Vec<_>>(), ["a", "b"]);
    }
}
