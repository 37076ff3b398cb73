use std::fmt;

use crate::error::EditorError;
use crate::recipe_doc::{format_quantity, parse_float, Ingredient, RecipeDocument};

pub const DEFAULT_SCALE_LABEL: &str = "1x";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(u64);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One ingredient line. `base_quantity` is what gets stored; the quantity
/// input shows `displayed_quantity`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IngredientRow {
    pub id: RowId,
    pub name: String,
    pub base_quantity: String,
    pub displayed_quantity: String,
    pub unit: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldEdit {
    Duration(String),
    Scale(String),
    ScaleReference(String),
    IngredientName { row: RowId, value: String },
    IngredientQuantity { row: RowId, value: String },
    IngredientUnit { row: RowId, value: String },
    AddIngredient,
    RemoveIngredient(RowId),
    MainRecipe(String),
    ForNextTime(String),
    AvoidDoing(String),
}

impl FieldEdit {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Duration(_) => "duration",
            Self::Scale(_) => "scale",
            Self::ScaleReference(_) => "scale-reference",
            Self::IngredientName { .. } => "ingredient-name",
            Self::IngredientQuantity { .. } => "ingredient-quantity",
            Self::IngredientUnit { .. } => "ingredient-unit",
            Self::AddIngredient => "add-ingredient",
            Self::RemoveIngredient(_) => "remove-ingredient",
            Self::MainRecipe(_) => "main-recipe",
            Self::ForNextTime(_) => "for-next-time",
            Self::AvoidDoing(_) => "avoid-doing",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditOutcome {
    pub rescaled: bool,
    pub revision: u64,
}

/// In-memory form state for one editing session. The text fields hold exactly
/// what the inputs hold, including a scale that does not parse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecipeForm {
    pub duration: String,
    pub scale: String,
    pub scale_reference: String,
    pub ingredients: Vec<IngredientRow>,
    pub main_recipe: String,
    pub for_next_time: String,
    pub avoid_doing: String,
    pub revision: u64,
    next_row_id: u64,
}

impl Default for RecipeForm {
    fn default() -> Self {
        Self::load(&RecipeDocument::default())
    }
}

impl RecipeForm {
    pub fn load(doc: &RecipeDocument) -> Self {
        let scale = match doc.scale {
            Some(scale) if scale != 0.0 && !scale.is_nan() => scale.to_string(),
            _ => "1".to_string(),
        };

        let mut form = Self {
            duration: doc.duration.clone(),
            scale,
            scale_reference: doc.scale_reference.clone(),
            ingredients: Vec::with_capacity(doc.ingredients.len().max(1)),
            main_recipe: doc.main_recipe.clone(),
            for_next_time: doc.for_next_time.clone(),
            avoid_doing: doc.avoid_doing.clone(),
            revision: 0,
            next_row_id: 0,
        };

        if doc.ingredients.is_empty() {
            form.add_ingredient_row(Ingredient::default());
        } else {
            for ingredient in &doc.ingredients {
                form.add_ingredient_row(ingredient.clone());
            }
        }
        form.recompute_scaled();
        form
    }

    /// Appends a row showing `initial.quantity` unscaled; callers recompute.
    pub fn add_ingredient_row(&mut self, initial: Ingredient) -> RowId {
        let id = RowId(self.next_row_id);
        self.next_row_id += 1;
        self.ingredients.push(IngredientRow {
            id,
            name: initial.name,
            displayed_quantity: initial.quantity.clone(),
            base_quantity: initial.quantity,
            unit: initial.unit,
        });
        id
    }

    pub fn row(&self, id: RowId) -> Option<&IngredientRow> {
        self.ingredients.iter().find(|row| row.id == id)
    }

    fn row_mut(&mut self, id: RowId) -> Result<&mut IngredientRow, EditorError> {
        self.ingredients
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(EditorError::UnknownRow(id))
    }

    /// Zero and unparsable scales count as 1.
    pub fn effective_scale(&self) -> f64 {
        parse_float(&self.scale)
            .filter(|scale| *scale != 0.0)
            .unwrap_or(1.0)
    }

    pub fn scale_reference_label(&self) -> &str {
        if self.scale_reference.is_empty() {
            DEFAULT_SCALE_LABEL
        } else {
            &self.scale_reference
        }
    }

    /// Rows with an empty base keep whatever they show. A base that does not
    /// parse is shown as typed.
    pub fn recompute_scaled(&mut self) -> bool {
        self.rescale(None)
    }

    /// `typing` is the row whose quantity input is being edited. Its text is
    /// left alone while it already reads as the scaled value, so partial input
    /// like `"2."` or `"1.50"` survives the keystroke.
    fn rescale(&mut self, typing: Option<RowId>) -> bool {
        let scale = self.effective_scale();
        let mut changed = false;
        for row in &mut self.ingredients {
            if row.base_quantity.is_empty() {
                continue;
            }
            let next = match parse_float(&row.base_quantity) {
                Some(base) => format_quantity(base * scale),
                None => row.base_quantity.clone(),
            };
            if typing == Some(row.id)
                && parse_float(&row.displayed_quantity).is_some()
                && parse_float(&row.displayed_quantity) == parse_float(&next)
            {
                continue;
            }
            if row.displayed_quantity != next {
                row.displayed_quantity = next;
                changed = true;
            }
        }
        changed
    }

    pub fn apply_field_edit(&mut self, edit: FieldEdit) -> Result<EditOutcome, EditorError> {
        let mut rescaled = false;
        match edit {
            FieldEdit::Duration(value) => self.duration = value,
            FieldEdit::Scale(value) => {
                self.scale = value;
                rescaled = self.recompute_scaled();
            }
            FieldEdit::ScaleReference(value) => self.scale_reference = value,
            FieldEdit::IngredientName { row, value } => self.row_mut(row)?.name = value,
            FieldEdit::IngredientQuantity { row: id, value } => {
                let row = self.row_mut(id)?;
                row.base_quantity = value.clone();
                row.displayed_quantity = value;
                rescaled = self.rescale(Some(id));
            }
            FieldEdit::IngredientUnit { row, value } => self.row_mut(row)?.unit = value,
            FieldEdit::AddIngredient => {
                self.add_ingredient_row(Ingredient::default());
            }
            FieldEdit::RemoveIngredient(row) => {
                let index = self
                    .ingredients
                    .iter()
                    .position(|existing| existing.id == row)
                    .ok_or(EditorError::UnknownRow(row))?;
                self.ingredients.remove(index);
            }
            FieldEdit::MainRecipe(value) => self.main_recipe = value,
            FieldEdit::ForNextTime(value) => self.for_next_time = value,
            FieldEdit::AvoidDoing(value) => self.avoid_doing = value,
        }

        self.revision += 1;
        Ok(EditOutcome {
            rescaled,
            revision: self.revision,
        })
    }

    /// The document to persist. Quantities are the base values and the scale
    /// is parsed as typed, so an unparsable scale becomes `None`.
    pub fn serialize(&self) -> RecipeDocument {
        RecipeDocument {
            duration: self.duration.clone(),
            scale: parse_float(&self.scale),
            scale_reference: self.scale_reference.clone(),
            ingredients: self
                .ingredients
                .iter()
                .map(|row| Ingredient::new(&row.name, &row.base_quantity, &row.unit))
                .collect(),
            main_recipe: self.main_recipe.clone(),
            for_next_time: self.for_next_time.clone(),
            avoid_doing: self.avoid_doing.clone(),
        }
    }
}
