use proptest::prelude::*;

use super::{Amount, MAX_MONEY};

impl Arbitrary for Amount {
    type Parameters = ();

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        (0..=MAX_MONEY).prop_map(Amount).boxed()
    }

    type Strategy = BoxedStrategy<Self>;
}
