use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::catalog::ExpressionList;
use crate::config::EngineConfig;
use crate::expression::{Expression, Operand, Token};
use crate::operation::{default_operations, Operation};

fn op(symbol: char) -> Operation {
    default_operations()
        .into_iter()
        .find(|op| op.symbol() == symbol)
        .unwrap()
}

fn template(text: &str) -> Expression {
    Expression::parse(text, &default_operations(), true, Some(9)).unwrap()
}

#[test]
fn test_oracle_accepts_distinct_and_rejects_equivalent() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut list = ExpressionList::new(2, Some(9), 3, true, &mut rng);

    assert!(list.add(template("(0+1)")).unwrap());
    // Commutative duplicate: same value under every fingerprint.
    assert!(!list.add(template("(1+0)")).unwrap());
    assert!(list.add(template("(0-1)")).unwrap());
    assert!(list.add(template("(1-0)")).unwrap());
    assert_eq!(list.len(), 3);
}

#[test]
fn test_undefined_never_registers_in_seen_sets() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let mut list = ExpressionList::new(2, Some(9), 3, false, &mut rng);

    // 1 / (2 - 2) is undefined.
    let undefined = Expression::postfix(
        vec![
            Token::Operand(Operand::Number(1.0)),
            Token::Operand(Operand::Number(2.0)),
            Token::Operand(Operand::Number(2.0)),
            Token::Operator(op('-')),
            Token::Operator(op('/')),
        ],
        false,
        Some(9),
    )
    .unwrap();
    assert_eq!(undefined.value(), None);

    assert!(list.add(undefined.clone()).unwrap());
    assert_eq!(list.seen_counts(), vec![0, 0, 0]);

    // With nothing recorded, a second undefined candidate is accepted too.
    assert!(list.add(undefined).unwrap());
    assert_eq!(list.seen_counts(), vec![0, 0, 0]);
}

#[test]
fn test_substitute_all_preserves_order() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut list = ExpressionList::new(2, Some(9), 3, true, &mut rng);
    list.add(template("(0+1)")).unwrap();
    list.add(template("(0-1)")).unwrap();
    list.add(template("(0/1)")).unwrap();

    let concrete = list.substitute_all(&[6.0, 3.0]).unwrap();
    assert!(!concrete.is_generic());
    assert_eq!(
        concrete.values().unwrap(),
        vec![Some(9.0), Some(3.0), Some(2.0)]
    );

    // A concrete list cannot be substituted again.
    assert!(concrete.substitute_all(&[1.0, 2.0]).is_err());
    // A generic list has no cached values to report.
    assert!(list.values().is_err());
}

#[test]
fn test_relabeled() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut list = ExpressionList::new(2, Some(9), 3, true, &mut rng);
    list.add(template("(0-1)")).unwrap();

    let relabeled = list.relabeled(&[2, 0]).unwrap();
    assert_eq!(relabeled.len(), 1);
    assert_eq!(relabeled[0].to_string(), "(2-0)");
}

#[test]
fn test_catalogue_round_trip() {
    let mut rng = ChaCha8Rng::seed_from_u64(23);
    let mut list = ExpressionList::new(2, Some(9), 3, true, &mut rng);
    list.add(template("(0+1)")).unwrap();
    list.add(template("(0-1)")).unwrap();
    list.add(template("(1-0)")).unwrap();
    list.add(template("(0*1)")).unwrap();

    let mut buffer = Vec::new();
    list.write_catalogue(&mut buffer).unwrap();
    let text = String::from_utf8(buffer.clone()).unwrap();
    assert!(text.starts_with("0: (0+1)\n"));

    let config = EngineConfig::new(2);
    let restored = ExpressionList::read_catalogue(buffer.as_slice(), &config).unwrap();
    assert_eq!(restored.len(), list.len());
    assert!(restored.is_generic());
    let original: Vec<String> = list.iter().map(ToString::to_string).collect();
    let round_tripped: Vec<String> = restored.iter().map(ToString::to_string).collect();
    assert_eq!(original, round_tripped);
}

#[test]
fn test_read_catalogue_rejects_malformed_lines() {
    let config = EngineConfig::new(2);
    let result = ExpressionList::read_catalogue("not a catalogue line".as_bytes(), &config);
    assert!(result.is_err());
}
