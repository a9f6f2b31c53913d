use crate::{Kind, Reflect, ReflectError, ReflectMut, ReflectRef};

macro_rules! impl_scalar {
    ($kind:expr => $($ty:ty),+ $(,)?) => {$(
        impl Reflect for $ty {
            fn kind(&self) -> Kind {
                $kind
            }

            any_methods!();

            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::Leaf
            }

            fn reflect_mut(&mut self) -> ReflectMut<'_> {
                ReflectMut::Leaf
            }

            fn set_zero(&mut self) -> Result<(), ReflectError> {
                *self = <$ty>::default();
                Ok(())
            }
        }
    )+};
}

impl_scalar!(Kind::Bool => bool);
impl_scalar!(Kind::Int => i8, i16, i32, i64, i128, isize);
impl_scalar!(Kind::Uint => u8, u16, u32, u64, u128, usize);
impl_scalar!(Kind::Float => f32, f64);
impl_scalar!(Kind::Char => char);
impl_scalar!(Kind::String => String);
impl_scalar!(Kind::Opaque => ());

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::bool(Box::new(true), Kind::Bool)]
    #[case::int(Box::new(-4_i64), Kind::Int)]
    #[case::uint(Box::new(4_usize), Kind::Uint)]
    #[case::float(Box::new(1.5_f32), Kind::Float)]
    #[case::char(Box::new('x'), Kind::Char)]
    #[case::string(Box::new(String::from("s")), Kind::String)]
    #[case::unit(Box::new(()), Kind::Opaque)]
    fn test_scalar_kinds(#[case] value: Box<dyn Reflect>, #[case] expected: Kind) {
        assert_eq!(value.kind(), expected);
        assert!(matches!(value.reflect_ref(), ReflectRef::Leaf));
    }

    #[test]
    fn test_scalar_zero_values() {
        let mut text = String::from("text");
        let mut number = 9_u8;
        let mut flag = true;
        let mut letter = 'a';
        text.set_zero().unwrap();
        number.set_zero().unwrap();
        flag.set_zero().unwrap();
        letter.set_zero().unwrap();
        assert_eq!(text, "");
        assert_eq!(number, 0);
        assert!(!flag);
        assert_eq!(letter, '\0');
    }
}
