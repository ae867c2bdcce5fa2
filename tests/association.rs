use approx::assert_relative_eq;
use hypotests::prelude::*;

fn hotel_table() -> ContingencyTable {
    // Hotel cleanliness rating against customer satisfaction.
    ContingencyTable::new(&[vec![27, 25, 14, 7, 0], vec![7, 14, 18, 35, 12], vec![1, 3, 2, 7, 17]]).unwrap()
}

#[test]
fn test_somers_d_and_tau_b_share_pvalue() {
    let d = somers_d(&hotel_table()).unwrap();
    let tau = kendall_tau_b(&hotel_table()).unwrap();
    assert_relative_eq!(d.statistic, 0.6032766111513396, max_relative = 1e-12);
    assert_relative_eq!(tau.statistic, 0.5327449897133099, max_relative = 1e-12);
    assert_relative_eq!(d.pvalue, tau.pvalue, max_relative = 1e-9);
    assert!(d.pvalue < 1e-20);
}

#[test]
fn test_measures_bounded() {
    let table = ContingencyTable::new(&[vec![2, 1, 0], vec![1, 2, 1], vec![0, 1, 2]]).unwrap();
    let d = somers_d(&table).unwrap();
    let tau = kendall_tau_b(&table).unwrap();
    assert!(d.statistic > 0.0 && d.statistic <= 1.0);
    assert!(tau.statistic > 0.0 && tau.statistic <= 1.0);
    assert!((0.0..=1.0).contains(&d.pvalue));
}

#[test]
fn test_reversed_columns_negate() {
    let rows = vec![vec![5, 2, 1], vec![1, 3, 4]];
    let reversed: Vec<Vec<i64>> = rows.iter().map(|r| r.iter().rev().copied().collect()).collect();
    let d = somers_d(&ContingencyTable::new(&rows).unwrap()).unwrap();
    let d_rev = somers_d(&ContingencyTable::new(&reversed).unwrap()).unwrap();
    assert_relative_eq!(d.statistic, -d_rev.statistic, max_relative = 1e-12);
    assert_relative_eq!(d.pvalue, d_rev.pvalue, max_relative = 1e-9);
}

#[test]
fn test_too_few_observations() {
    let table = ContingencyTable::new(&[vec![0, 3], vec![0, 0]]).unwrap();
    assert!(matches!(somers_d(&table), Err(HypotestError::InsufficientData(_))));
    assert!(matches!(kendall_tau_b(&table), Err(HypotestError::InsufficientData(_))));
}
