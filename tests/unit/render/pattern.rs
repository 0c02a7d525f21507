use super::*;

#[test]
fn bitmap_size_must_match_dimensions() {
    assert!(FillPattern::new(2, 2, vec![1, 0, 0, 1]).is_ok());
    let err = FillPattern::new(2, 3, vec![1, 0]).unwrap_err();
    assert!(matches!(err, PlotError::Validation(_)));
}

#[test]
fn sparse_table_reports_missing_patterns() {
    let table = PatternTable::new().with(3, FillPattern::new(1, 2, vec![5, 6]).unwrap());
    assert!(table.get(0).is_none());
    assert!(table.get(7).is_none());
    assert_eq!(table.get(3).map(|p| p.bits.as_slice()), Some(&[5, 6][..]));
    assert_eq!(table.original_dims(3), (1, 2));
    assert_eq!(table.original_dims(1), (0, 0));
}
