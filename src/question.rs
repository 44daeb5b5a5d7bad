use crate::color::{Catalog, ColorName};
use crate::settings::GameSettings;
use color_eyre::eyre::{Result, bail};
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    pub correct: ColorName,
    /// Left to right. Holds `correct` exactly once, no repeats.
    pub squares: Vec<ColorName>,
}

impl Question {
    #[cfg(test)]
    pub fn correct_index(&self) -> Option<usize> {
        self.squares.iter().position(|&c| c == self.correct)
    }
}

pub fn generate_question<R: Rng + ?Sized>(
    settings: &GameSettings,
    catalog: &Catalog,
    rng: &mut R,
) -> Result<Question> {
    let enabled: Vec<ColorName> = catalog.enabled().collect();

    let correct = match settings.forced_color {
        Some(forced) if catalog.is_enabled(forced) => forced,
        Some(forced) => bail!("forced color {forced} is not enabled"),
        None => match enabled.choose(rng) {
            Some(&color) => color,
            None => bail!("no colors are enabled"),
        },
    };

    let others: Vec<ColorName> = enabled.into_iter().filter(|&c| c != correct).collect();
    let wanted = usize::from(settings.num_choices).saturating_sub(1);
    if wanted > others.len() {
        bail!(
            "{} choices need {wanted} colors besides {correct}, only {} are enabled",
            settings.num_choices,
            others.len()
        );
    }

    let mut squares: Vec<ColorName> = others.choose_multiple(rng, wanted).copied().collect();
    squares.push(correct);
    squares.shuffle(rng);

    Ok(Question { correct, squares })
}
