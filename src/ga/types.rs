//! Population member of the GA.

use crate::solution::Solution;

/// A candidate in the GA population: one [`Solution`] plus its cached
/// fitness.
///
/// Fitness is the solution's [`score`](Solution::score), so higher is
/// better. Replacing the solution through [`set_solution`](Self::set_solution)
/// recomputes it.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    solution: Solution,
    fitness: f64,
}

impl Individual {
    /// Wraps `solution` and evaluates it.
    pub fn new(solution: Solution) -> Self {
        let fitness = solution.score();
        Self { solution, fitness }
    }

    /// Wraps `solution` without scoring it. Call [`evaluate`](Self::evaluate)
    /// before the fitness is read.
    pub(crate) fn unevaluated(solution: Solution) -> Self {
        Self {
            solution,
            fitness: f64::NEG_INFINITY,
        }
    }

    pub(crate) fn evaluate(&mut self) {
        self.fitness = self.solution.score();
    }

    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn set_solution(&mut self, solution: Solution) {
        self.solution = solution;
        self.evaluate();
    }

    pub fn into_solution(self) -> Solution {
        self.solution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutation::initial_solution;
    use crate::network::fixtures;
    use crate::random::create_rng;
    use crate::solution::Path;

    #[test]
    fn test_fitness_tracks_solution() {
        let network = fixtures::diamond(10);
        let mut rng = create_rng(Some(42));
        let solution = initial_solution(&network, &mut rng).unwrap();
        let mut individual = Individual::new(solution.clone());
        assert_eq!(individual.fitness(), solution.score());

        // Both demands on the direct edge: ratio 1.0, score 0.0.
        let stacked = Solution::new(
            &network,
            vec![Path::new(vec![0, 3]), Path::new(vec![0, 3])],
        )
        .unwrap();
        individual.set_solution(stacked);
        assert!(individual.fitness().abs() < 1e-12);
    }

    #[test]
    fn test_unevaluated_until_evaluate() {
        let network = fixtures::single_edge(10, 5);
        let mut rng = create_rng(Some(1));
        let solution = initial_solution(&network, &mut rng).unwrap();
        let mut individual = Individual::unevaluated(solution);
        assert_eq!(individual.fitness(), f64::NEG_INFINITY);
        individual.evaluate();
        assert!((individual.fitness() - 0.5).abs() < 1e-12);
    }
}
