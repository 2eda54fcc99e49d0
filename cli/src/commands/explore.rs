//! `medcompare explore` — interactive medicine and plan selection.

use std::io::IsTerminal as _;
use std::process::ExitCode;

use anyhow::{Result, bail};
use dialoguer::Select;
use dialoguer::theme::ColorfulTheme;
use medcompare_common::Catalog;
use medcompare_common::recommend::{
    medicine_comparison, plan_comparison, recommend, report, selection_details,
};

use crate::app::AppContext;
use crate::application::services::catalog_service::{Choice, medicine_choices, plan_choices};
use crate::domain::bootstrap::APP_TITLE;
use crate::output::HumanRenderer;
use crate::output::human::choice_label;

const ORDER_ITEMS: [&str; 2] = ["Medicine first", "Insurance first"];
const MENU_ITEMS: [&str; 3] = [
    "Compare a different medicine",
    "Compare a different insurance plan",
    "Exit",
];

/// Run the explore command.
///
/// # Errors
///
/// Returns an error if stdin is not a terminal, JSON output was requested,
/// or the catalog cannot be loaded.
pub fn run(app: &AppContext) -> Result<ExitCode> {
    if app.is_json() {
        bail!("explore is interactive; use `compare` or `report` with --json");
    }
    if !std::io::stdin().is_terminal() {
        bail!("explore needs an interactive terminal; use `compare` or `report` instead");
    }

    let (catalog, _) = app.load_catalog()?;
    app.output.header(&APP_TITLE.to_uppercase());

    let session = Session {
        catalog: &catalog,
        renderer: HumanRenderer::new(&app.output),
        theme: ColorfulTheme::default(),
    };
    if !session.run()? {
        println!();
        app.output.warn("Application terminated by user.");
    }
    Ok(ExitCode::SUCCESS)
}

struct Session<'a> {
    catalog: &'a Catalog,
    renderer: HumanRenderer<'a>,
    theme: ColorfulTheme,
}

impl Session<'_> {
    /// `false` when the user cancelled a prompt.
    fn run(&self) -> Result<bool> {
        let Some((mut medicine, mut insurance)) = self.initial_selection()? else {
            return Ok(false);
        };
        self.renderer
            .render_report(&report(self.catalog, &medicine, &insurance)?);

        loop {
            let Some(action) = self.select("What would you like to do?", &MENU_ITEMS)? else {
                return Ok(false);
            };
            match action {
                0 => {
                    let choices = medicine_choices(self.catalog, None);
                    let Some(picked) = self.pick("Select a medicine", &choices, "")? else {
                        return Ok(false);
                    };
                    medicine = picked;
                    self.renderer.render_selection(&selection_details(
                        self.catalog,
                        &medicine,
                        &insurance,
                    )?);
                    self.renderer.render_medicine_comparison(
                        &insurance,
                        &medicine_comparison(self.catalog, &insurance, Some(&medicine))?,
                    );
                }
                1 => {
                    let choices = plan_choices(self.catalog, None);
                    let Some(picked) = self.pick("Select an insurance plan", &choices, "")? else {
                        return Ok(false);
                    };
                    insurance = picked;
                    self.renderer.render_selection(&selection_details(
                        self.catalog,
                        &medicine,
                        &insurance,
                    )?);
                    self.renderer.render_plan_comparison(
                        &medicine,
                        &plan_comparison(self.catalog, &medicine, Some(&insurance))?,
                    );
                }
                _ => {
                    println!();
                    println!("Thank you for using the {APP_TITLE}!");
                    return Ok(true);
                }
            }
            self.renderer
                .render_recommendations(&recommend(self.catalog, &medicine, &insurance)?);
        }
    }

    fn initial_selection(&self) -> Result<Option<(String, String)>> {
        let Some(order) = self.select("Choose selection order", &ORDER_ITEMS)? else {
            return Ok(None);
        };

        if order == 0 {
            let Some(medicine) =
                self.pick("Select your current medicine", &medicine_choices(self.catalog, None), "")?
            else {
                return Ok(None);
            };
            let plans = plan_choices(self.catalog, Some(&medicine));
            let Some(insurance) = self.pick("Select your insurance plan", &plans, "Covers")? else {
                return Ok(None);
            };
            Ok(Some((medicine, insurance)))
        } else {
            let Some(insurance) =
                self.pick("Select your insurance plan", &plan_choices(self.catalog, None), "")?
            else {
                return Ok(None);
            };
            let medicines = medicine_choices(self.catalog, Some(&insurance));
            let Some(medicine) =
                self.pick("Select your current medicine", &medicines, "Covered")?
            else {
                return Ok(None);
            };
            Ok(Some((medicine, insurance)))
        }
    }

    fn pick(&self, prompt: &str, choices: &[Choice], verb: &str) -> Result<Option<String>> {
        let labels: Vec<String> = choices.iter().map(|c| choice_label(c, verb)).collect();
        Ok(self
            .select(prompt, &labels)?
            .and_then(|idx| choices.get(idx))
            .map(|c| c.name.clone()))
    }

    fn select<T: ToString>(&self, prompt: &str, items: &[T]) -> Result<Option<usize>> {
        let labels: Vec<String> = items.iter().map(ToString::to_string).collect();
        let picked = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(&labels)
            .default(0)
            .interact_opt();
        match picked {
            Ok(idx) => Ok(idx),
            Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::Interrupted => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}
