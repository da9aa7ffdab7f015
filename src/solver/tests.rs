use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::catalog::ExpressionList;
use crate::config::EngineConfig;
use crate::expression::Expression;
use crate::generator::ExpressionDynamicProgramming;
use crate::operation::default_operations;
use crate::solver::constants::EPSILON;
use crate::solver::{Solver, SolverError};

fn solver(num_values: usize, seed: u64) -> Solver {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let strategy = ExpressionDynamicProgramming::new(EngineConfig::new(num_values));
    Solver::new(&strategy, &mut rng).unwrap()
}

#[test]
fn test_solve_four_one_eight_seven() {
    let solver = solver(4, 1);
    let question = solver.solve(&[4.0, 1.0, 8.0, 7.0], 24.0).unwrap();
    assert!(question.num_solutions() >= 1);

    // Re-check every reported solution through the independent
    // parenthetical parser path.
    let ops = default_operations();
    for rendered in question.render_solutions() {
        let reparsed = Expression::parse(&rendered, &ops, false, None).unwrap();
        let value = reparsed.evaluate().unwrap().unwrap();
        assert!(
            (value - 24.0).abs() <= EPSILON,
            "{} evaluates to {}",
            rendered,
            value
        );
    }
}

#[test]
fn test_solve_checks_arity() {
    let solver = solver(4, 2);
    assert_eq!(solver.num_values(), 4);
    let result = solver.solve(&[4.0, 1.0, 8.0], 24.0);
    assert!(matches!(
        result,
        Err(SolverError::ArityMismatch {
            expected: 4,
            supplied: 3
        })
    ));
}

#[test]
fn test_undefined_evaluations_never_solve() {
    let solver = solver(2, 3);
    // With operands (5, 0) one division order is undefined; the defined
    // routes to 0 are the product and the other division order.
    let question = solver.solve(&[5.0, 0.0], 0.0).unwrap();
    assert_eq!(question.num_solutions(), 2);
    for solution in question.solutions() {
        assert_eq!(solution.concrete().value(), Some(0.0));
    }
}

#[test]
fn test_create_valid_question_accepts_in_range() {
    let solver = solver(2, 4);
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let question = solver
        .create_valid_question(&mut rng, 6.0, 1..=9, 0..=10_000, 100)
        .unwrap();
    assert!((0..=10_000).contains(&question.num_solutions()));
    assert_eq!(question.values().len(), 2);
}

#[test]
fn test_create_valid_question_returns_last_attempt_on_exhaustion() {
    let solver = solver(2, 6);
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    // A 2-operand catalogue holds 6 expressions; thousands of solutions are
    // unreachable, so the cap must trip and the last attempt comes back.
    let question = solver
        .create_valid_question(&mut rng, 6.0, 1..=9, 5000..=6000, 3)
        .unwrap();
    assert!(!(5000..=6000).contains(&question.num_solutions()));
}

#[test]
fn test_create_valid_question_rejects_zero_attempts() {
    let solver = solver(2, 8);
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let result = solver.create_valid_question(&mut rng, 6.0, 1..=9, 1..=1, 0);
    assert!(matches!(result, Err(SolverError::NoAttempts)));
}

#[test]
fn test_generate_set_of_valid_questions_unique_solutions() {
    let solver = solver(4, 10);
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let questions: Vec<_> = solver
        .generate_set_of_valid_questions(&mut rng, 5, 24.0, 1..=15, 1..=1, 10_000)
        .collect::<Result<_, _>>()
        .unwrap();
    // Fewer than five only if some attempt cap was exhausted.
    assert!(questions.len() <= 5);
    for question in &questions {
        assert_eq!(question.num_solutions(), 1);
        assert!(question.values().iter().all(|v| (1.0..=15.0).contains(v)));
    }
}

#[test]
fn test_generate_solver_from_values() {
    let full = solver(4, 12);
    let values = [4.0, 1.0, 8.0, 7.0];
    let reduced = full.generate_solver_from_values(&values).unwrap();

    assert!(reduced.catalogue().is_generic());
    assert!(reduced.catalogue().len() <= full.catalogue().len());

    // The reduced solver keeps exactly one expression per distinct value of
    // its generator tuple, so a reachable goal has exactly one solution.
    assert!(full.solve(&values, 24.0).unwrap().num_solutions() >= 1);
    assert_eq!(reduced.solve(&values, 24.0).unwrap().num_solutions(), 1);
}

#[test]
fn test_solver_from_persisted_catalogue() {
    let original = solver(2, 13);
    let mut buffer = Vec::new();
    original.catalogue().write_catalogue(&mut buffer).unwrap();

    let config = EngineConfig::new(2);
    let restored = ExpressionList::read_catalogue(buffer.as_slice(), &config).unwrap();
    let solver = Solver::with_catalogue(restored).unwrap();

    // (3 + 3) is the only route to 6 from (3, 3).
    let question = solver.solve(&[3.0, 3.0], 6.0).unwrap();
    assert_eq!(question.num_solutions(), 1);
}

#[test]
fn test_with_catalogue_rejects_concrete_lists() {
    let concrete = ExpressionList::from_expressions(Vec::new(), 2, None, false);
    assert!(matches!(
        Solver::with_catalogue(concrete),
        Err(SolverError::ConcreteCatalogue)
    ));
}
