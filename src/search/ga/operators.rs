//! Real-coded crossover and mutation on unit-hypercube genes.
//!
//! All operators keep genes inside `[0, 1]`: recombination of in-range
//! parents stays in range, and mutations that move a gene clip it.
//!
//! # References
//!
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"
//! - Michalewicz (1996), *Genetic Algorithms + Data Structures = Evolution
//!   Programs* (arithmetic crossover, uniform mutation)

use rand::Rng;

/// Recombination operator.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Crossover {
    /// Each gene comes from either parent with probability 1/2.
    #[default]
    Uniform,

    /// Genes after a random cut point are exchanged.
    OnePoint,

    /// Children are complementary convex blends `a·p1 + (1 − a)·p2`.
    Arithmetic,
}

/// Mutation operator.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mutation {
    /// Exchange two random genes. Under the index decoding this swaps the
    /// roles of two nodes.
    #[default]
    Swap,

    /// Redraw one random gene uniformly from `[0, 1)`.
    Reset,

    /// Shift one random gene by a uniform step in `[−δ, δ]`, then clip.
    Perturb(f64),
}

impl Crossover {
    /// Produces two children from two equal-length parents.
    pub fn apply<R: Rng>(&self, p1: &[f64], p2: &[f64], rng: &mut R) -> (Vec<f64>, Vec<f64>) {
        match self {
            Crossover::Uniform => uniform_crossover(p1, p2, rng),
            Crossover::OnePoint => one_point_crossover(p1, p2, rng),
            Crossover::Arithmetic => arithmetic_crossover(p1, p2, rng),
        }
    }
}

impl Mutation {
    /// Mutates `genes` in place.
    pub fn apply<R: Rng>(&self, genes: &mut [f64], rng: &mut R) {
        match *self {
            Mutation::Swap => swap_mutation(genes, rng),
            Mutation::Reset => reset_mutation(genes, rng),
            Mutation::Perturb(step) => perturb_mutation(genes, step, rng),
        }
    }
}

/// Uniform crossover.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn uniform_crossover<R: Rng>(p1: &[f64], p2: &[f64], rng: &mut R) -> (Vec<f64>, Vec<f64>) {
    assert_eq!(p1.len(), p2.len(), "parents must have equal length");

    let mut c1 = p1.to_vec();
    let mut c2 = p2.to_vec();
    for i in 0..p1.len() {
        if rng.random_bool(0.5) {
            std::mem::swap(&mut c1[i], &mut c2[i]);
        }
    }
    (c1, c2)
}

/// Single-point crossover with the cut in `1..n`.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn one_point_crossover<R: Rng>(p1: &[f64], p2: &[f64], rng: &mut R) -> (Vec<f64>, Vec<f64>) {
    let n = p1.len();
    assert_eq!(n, p2.len(), "parents must have equal length");

    if n < 2 {
        return (p1.to_vec(), p2.to_vec());
    }
    let point = rng.random_range(1..n);
    let mut c1 = p1.to_vec();
    let mut c2 = p2.to_vec();
    c1[point..].copy_from_slice(&p2[point..]);
    c2[point..].copy_from_slice(&p1[point..]);
    (c1, c2)
}

/// Whole arithmetic crossover with a random blend factor.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn arithmetic_crossover<R: Rng>(p1: &[f64], p2: &[f64], rng: &mut R) -> (Vec<f64>, Vec<f64>) {
    assert_eq!(p1.len(), p2.len(), "parents must have equal length");

    let a: f64 = rng.random_range(0.0..1.0);
    let c1 = p1.iter().zip(p2).map(|(&x, &y)| a * x + (1.0 - a) * y).collect();
    let c2 = p1.iter().zip(p2).map(|(&x, &y)| (1.0 - a) * x + a * y).collect();
    (c1, c2)
}

/// Swap mutation: exchange two random positions.
pub fn swap_mutation<R: Rng>(genes: &mut [f64], rng: &mut R) {
    let n = genes.len();
    if n < 2 {
        return;
    }
    let i = rng.random_range(0..n);
    let j = rng.random_range(0..n);
    genes.swap(i, j);
}

/// Uniform reset of one random gene.
pub fn reset_mutation<R: Rng>(genes: &mut [f64], rng: &mut R) {
    if genes.is_empty() {
        return;
    }
    let i = rng.random_range(0..genes.len());
    genes[i] = rng.random_range(0.0..1.0);
}

/// Bounded uniform perturbation of one random gene.
pub fn perturb_mutation<R: Rng>(genes: &mut [f64], step: f64, rng: &mut R) {
    if genes.is_empty() || !(step > 0.0) {
        return;
    }
    let i = rng.random_range(0..genes.len());
    genes[i] = (genes[i] + rng.random_range(-step..=step)).clamp(0.0, 1.0);
}
