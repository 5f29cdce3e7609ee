//! Default recommendation table
//!
//! Written to `alimentacion.txt` by `seed-alimentacion` when the data
//! directory has none.

use crate::models::{Meal, Recommendation};

type Row = (&'static str, Option<Meal>, &'static str, &'static str, &'static str, f64, f64);

const ROWS: &[Row] = &[
    // ganar masa muscular
    ("ganar masa muscular", Some(Meal::Desayuno), "carbohidratos", "Avena", "1 taza", 80.0, 303.0),
    ("ganar masa muscular", Some(Meal::Desayuno), "proteinas", "Huevos", "3 unidades", 150.0, 215.0),
    ("ganar masa muscular", Some(Meal::Desayuno), "grasas saludables", "Mantequilla de maní", "2 cucharadas", 32.0, 188.0),
    ("ganar masa muscular", Some(Meal::Almuerzo), "carbohidratos", "Arroz integral", "1 1/2 tazas", 300.0, 333.0),
    ("ganar masa muscular", Some(Meal::Almuerzo), "proteinas", "Pechuga de pollo", "1 filete grande", 200.0, 330.0),
    ("ganar masa muscular", Some(Meal::Almuerzo), "grasas saludables", "Palta", "1/2 unidad", 70.0, 112.0),
    ("ganar masa muscular", None, "carbohidratos", "Banana", "1 unidad", 120.0, 107.0),
    ("ganar masa muscular", None, "proteinas", "Yogur griego", "1 pote", 170.0, 100.0),
    ("ganar masa muscular", None, "grasas saludables", "Nueces", "1 puñado", 30.0, 196.0),
    ("ganar masa muscular", Some(Meal::Cena), "carbohidratos", "Batata", "1 unidad mediana", 200.0, 172.0),
    ("ganar masa muscular", Some(Meal::Cena), "proteinas", "Carne magra", "1 bife", 180.0, 301.0),
    ("ganar masa muscular", Some(Meal::Cena), "grasas saludables", "Aceite de oliva", "1 cucharada", 14.0, 119.0),
    // tonificar
    ("tonificar", Some(Meal::Desayuno), "carbohidratos", "Pan integral", "2 rebanadas", 60.0, 148.0),
    ("tonificar", Some(Meal::Desayuno), "proteinas", "Claras de huevo", "4 unidades", 132.0, 69.0),
    ("tonificar", Some(Meal::Almuerzo), "carbohidratos", "Quinoa", "1 taza", 185.0, 222.0),
    ("tonificar", Some(Meal::Almuerzo), "proteinas", "Pechuga de pavo", "1 filete", 150.0, 189.0),
    ("tonificar", None, "grasas saludables", "Almendras", "1 puñado", 28.0, 164.0),
    ("tonificar", None, "grasas saludables", "Semillas de chía", "1 cucharada", 12.0, 58.0),
    ("tonificar", None, "proteinas", "Queso cottage", "1/2 taza", 113.0, 111.0),
    ("tonificar", None, "carbohidratos", "Manzana", "1 unidad", 180.0, 94.0),
    ("tonificar", Some(Meal::Cena), "proteinas", "Salmón", "1 filete", 150.0, 312.0),
    ("tonificar", Some(Meal::Cena), "grasas saludables", "Palta", "1/4 unidad", 35.0, 56.0),
    // bajar de peso
    ("bajar de peso", Some(Meal::Desayuno), "carbohidratos", "Frutillas", "1 taza", 150.0, 48.0),
    ("bajar de peso", Some(Meal::Desayuno), "proteinas", "Yogur descremado", "1 pote", 170.0, 90.0),
    ("bajar de peso", Some(Meal::Almuerzo), "carbohidratos", "Lentejas", "1/2 taza", 100.0, 116.0),
    ("bajar de peso", Some(Meal::Almuerzo), "proteinas", "Merluza", "1 filete", 150.0, 135.0),
    ("bajar de peso", Some(Meal::Almuerzo), "grasas saludables", "Aceite de oliva", "1 cucharadita", 5.0, 40.0),
    ("bajar de peso", None, "carbohidratos", "Zanahoria", "1 unidad", 60.0, 25.0),
    ("bajar de peso", None, "proteinas", "Atún al agua", "1 lata", 120.0, 139.0),
    ("bajar de peso", None, "grasas saludables", "Nueces", "3 unidades", 15.0, 98.0),
    ("bajar de peso", Some(Meal::Cena), "carbohidratos", "Brócoli", "1 taza", 90.0, 31.0),
    ("bajar de peso", Some(Meal::Cena), "proteinas", "Pechuga de pollo", "1 filete chico", 120.0, 198.0),
];

/// The built-in recommendation rows
pub fn default_recommendations() -> Vec<Recommendation> {
    ROWS.iter()
        .map(|(goal, meal, category, food, portion, grams, calories)| Recommendation {
            goal: goal.to_string(),
            meal: *meal,
            category: category.to_string(),
            food: food.to_string(),
            portion: portion.to_string(),
            grams: *grams,
            calories: *calories,
        })
        .collect()
}
