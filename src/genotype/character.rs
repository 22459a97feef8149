use super::builder::{Builder, TryFromBuilderError};
use super::Genotype;
use rand::Rng;
use std::fmt;
use std::ops::RangeInclusive;

/// Genotype with character alleles inside a contiguous ASCII range, by default the printable
/// range `' '..='~'`.
///
/// # Example:
/// ```
/// use evolutionary_algorithm::genotype::{CharacterGenotype, Genotype};
///
/// let genotype = CharacterGenotype::builder()
///     .with_chromosome_length(13)
///     .with_allele_range('a'..='z')
///     .build()
///     .unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct Character {
    pub num_chromosomes: usize,
    pub chromosome_length: usize,
    pub allele_range: RangeInclusive<char>,
    pub seed_genes_list: Vec<Vec<Vec<char>>>,
}

impl TryFrom<Builder<Character>> for Character {
    type Error = TryFromBuilderError;

    fn try_from(builder: Builder<Character>) -> Result<Self, Self::Error> {
        let Some(chromosome_length) = builder.chromosome_length else {
            return Err(TryFromBuilderError(
                "CharacterGenotype requires a chromosome_length",
            ));
        };
        let allele_range = builder.allele_range.unwrap_or(' '..='~');
        if !allele_range.start().is_ascii() || !allele_range.end().is_ascii() {
            return Err(TryFromBuilderError(
                "CharacterGenotype requires an ASCII allele_range",
            ));
        }
        if allele_range.is_empty() {
            return Err(TryFromBuilderError(
                "CharacterGenotype requires a non-empty allele_range",
            ));
        }
        if builder.num_chromosomes == 0 {
            return Err(TryFromBuilderError(
                "CharacterGenotype requires num_chromosomes > 0",
            ));
        }
        if !super::validate_seed_genes_list::<Character>(
            &builder.seed_genes_list,
            builder.num_chromosomes,
            chromosome_length,
        ) {
            return Err(TryFromBuilderError(
                "CharacterGenotype seed genes do not match the genome shape",
            ));
        }
        Ok(Self {
            num_chromosomes: builder.num_chromosomes,
            chromosome_length,
            allele_range,
            seed_genes_list: builder.seed_genes_list,
        })
    }
}

impl Character {
    fn code_min(&self) -> u32 {
        *self.allele_range.start() as u32
    }
    fn code_max(&self) -> u32 {
        *self.allele_range.end() as u32
    }

    fn from_code(&self, code: u32) -> char {
        // the range is validated ASCII, so the code is always a valid char
        char::from_u32(code).unwrap_or(*self.allele_range.start())
    }
}

impl Genotype for Character {
    type Allele = char;
    type Chromosome = Vec<char>;

    fn num_chromosomes(&self) -> usize {
        self.num_chromosomes
    }
    fn chromosome_length(&self) -> usize {
        self.chromosome_length
    }

    fn random_chromosome<R: Rng>(&self, rng: &mut R) -> Self::Chromosome {
        (0..self.chromosome_length)
            .map(|_| self.from_code(rng.gen_range(self.code_min()..=self.code_max())))
            .collect()
    }
    fn zero_chromosome(&self) -> Self::Chromosome {
        vec![*self.allele_range.start(); self.chromosome_length]
    }

    fn randomize_allele<R: Rng>(&self, chromosome: &mut Self::Chromosome, index: usize, rng: &mut R) {
        chromosome[index] = self.from_code(rng.gen_range(self.code_min()..=self.code_max()));
    }
    fn drift_allele<R: Rng>(&self, chromosome: &mut Self::Chromosome, index: usize, rng: &mut R) {
        let width = (self.code_max() - self.code_min() + 1) as i64;
        let delta: i64 = if rng.gen() { 1 } else { -1 };
        let offset = chromosome[index] as u32 as i64 - self.code_min() as i64;
        let code = self.code_min() as i64 + (offset + delta).rem_euclid(width);
        chromosome[index] = self.from_code(code as u32);
    }

    fn seed_genes_list(&self) -> &Vec<Vec<Self::Chromosome>> {
        &self.seed_genes_list
    }

    fn chromosome_to_string(&self, chromosome: &Self::Chromosome) -> String {
        chromosome.iter().collect()
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "genotype:")?;
        writeln!(f, "  type: character")?;
        writeln!(f, "  num_chromosomes: {}", self.num_chromosomes)?;
        writeln!(f, "  chromosome_length: {}", self.chromosome_length)?;
        writeln!(f, "  allele_range: {:?}", self.allele_range)
    }
}
