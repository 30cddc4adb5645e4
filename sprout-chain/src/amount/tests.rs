//! Tests for amounts

use color_eyre::eyre::Result;
use proptest::prelude::*;

use super::*;

#[test]
fn add_within_range() -> Result<()> {
    let _init_guard = sprout_test::init();

    let one = Amount::try_from(1)?;
    let two = (one + one)?;

    assert_eq!(two.zatoshis(), 2);
    Ok(())
}

#[test]
fn add_outside_money_range() -> Result<()> {
    let _init_guard = sprout_test::init();

    let max = Amount::try_from(MAX_MONEY)?;
    let one = Amount::try_from(1)?;

    assert!(matches!(max + one, Err(Error::Constraint { .. })));
    Ok(())
}

#[test]
fn out_of_range_value_is_rejected() {
    let _init_guard = sprout_test::init();

    assert!(Amount::try_from(MAX_MONEY + 1).is_err());
    assert!(Amount::try_from(u64::MAX).is_err());
    assert!(Amount::from_bytes(u64::MAX.to_le_bytes()).is_err());
}

#[test]
fn sum_stops_at_first_error() -> Result<()> {
    let _init_guard = sprout_test::init();

    let max = Amount::try_from(MAX_MONEY)?;
    let amounts = [max, max, Amount::zero()];

    let sum: super::Result<Amount> = amounts.iter().sum();
    assert!(sum.is_err());

    let amounts = [Amount::try_from(3)?, Amount::try_from(4)?];
    let sum: super::Result<Amount> = amounts.into_iter().sum();
    assert_eq!(sum?.zatoshis(), 7);

    Ok(())
}

proptest! {
    #[test]
    fn amount_bytes_are_little_endian(amount in any::<Amount>()) {
        let _init_guard = sprout_test::init();

        prop_assert_eq!(amount.to_bytes(), amount.zatoshis().to_le_bytes());
        prop_assert_eq!(Amount::from_bytes(amount.to_bytes()), Ok(amount));
    }
}
