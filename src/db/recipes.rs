//! Recipe catalog storage: recipes with nested ingredient lines, plus the
//! idempotent seeders that ship the built-in catalog. Recipes are keyed by
//! title for seeding purposes and are read-only from the engine's side.

use anyhow::{Context, Result};
use log::info;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

/// One ingredient line of a recipe. Quantity and unit are optional free-form
/// hints; matching goes through the canonical name only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub name: String,
    pub qty: Option<f64>,
    pub unit: Option<String>,
}

/// A stored recipe with its ingredient lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    pub steps: String,
    pub time_min: Option<i64>,
    pub difficulty: Option<String>,
    pub ingredients: Vec<RecipeIngredient>,
}

/// Initialize the recipes and recipe_ingredients tables
pub fn init_recipes_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS recipes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            steps TEXT,
            time_min INTEGER,
            difficulty TEXT
        )",
        [],
    )
    .context("Failed to create recipes table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS recipe_ingredients (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            recipe_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            qty REAL,
            unit TEXT,
            FOREIGN KEY (recipe_id) REFERENCES recipes(id) ON DELETE CASCADE
        )",
        [],
    )
    .context("Failed to create recipe_ingredients table")?;
    Ok(())
}

/// Insert a recipe together with its ingredient lines, returning its id
pub fn add_recipe(
    conn: &Connection,
    title: &str,
    steps: &str,
    ingredients: &[RecipeIngredient],
    time_min: Option<i64>,
    difficulty: Option<&str>,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO recipes (title, steps, time_min, difficulty) VALUES (?1, ?2, ?3, ?4)",
        params![title, steps, time_min, difficulty],
    )
    .context("Failed to insert recipe")?;

    let recipe_id = conn.last_insert_rowid();
    for ingredient in ingredients {
        conn.execute(
            "INSERT INTO recipe_ingredients (recipe_id, name, qty, unit) VALUES (?1, ?2, ?3, ?4)",
            params![recipe_id, ingredient.name, ingredient.qty, ingredient.unit],
        )
        .context("Failed to insert recipe ingredient")?;
    }

    info!("Recipe '{}' added with ID: {}", title, recipe_id);
    Ok(recipe_id)
}

/// Whether a recipe with this title already exists
pub fn has_recipe(conn: &Connection, title: &str) -> Result<bool> {
    let mut stmt = conn
        .prepare("SELECT 1 FROM recipes WHERE title = ?1 LIMIT 1")
        .context("Failed to prepare recipe lookup")?;
    stmt.exists(params![title])
        .context("Failed to check recipe existence")
}

/// Add a recipe unless one with this title exists; `None` when skipped
pub fn add_recipe_if_absent(
    conn: &Connection,
    title: &str,
    steps: &str,
    ingredients: &[RecipeIngredient],
    time_min: Option<i64>,
    difficulty: Option<&str>,
) -> Result<Option<i64>> {
    if has_recipe(conn, title)? {
        return Ok(None);
    }
    add_recipe(conn, title, steps, ingredients, time_min, difficulty).map(Some)
}

/// Fetch the whole catalog with nested ingredients, in insertion order
pub fn get_all_recipes(conn: &Connection) -> Result<Vec<Recipe>> {
    let mut stmt = conn
        .prepare("SELECT id, title, steps, time_min, difficulty FROM recipes")
        .context("Failed to prepare recipe listing")?;

    let rows = stmt
        .query_map([], |row| {
            Ok(Recipe {
                id: row.get(0)?,
                title: row.get(1)?,
                steps: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                time_min: row.get(3)?,
                difficulty: row.get(4)?,
                ingredients: Vec::new(),
            })
        })
        .context("Failed to list recipes")?;

    let mut recipes = Vec::new();
    for row in rows {
        recipes.push(row.context("Failed to read recipe row")?);
    }

    let mut ing_stmt = conn
        .prepare("SELECT name, qty, unit FROM recipe_ingredients WHERE recipe_id = ?1")
        .context("Failed to prepare ingredient listing")?;
    for recipe in &mut recipes {
        let rows = ing_stmt
            .query_map(params![recipe.id], |row| {
                Ok(RecipeIngredient {
                    name: row.get(0)?,
                    qty: row.get(1)?,
                    unit: row.get(2)?,
                })
            })
            .context("Failed to list recipe ingredients")?;
        for row in rows {
            recipe.ingredients.push(row.context("Failed to read ingredient row")?);
        }
    }

    Ok(recipes)
}

fn ing(name: &str, qty: f64, unit: &str) -> RecipeIngredient {
    RecipeIngredient {
        name: name.to_string(),
        qty: Some(qty),
        unit: Some(unit.to_string()),
    }
}

/// Seed three starter recipes once, only into an empty catalog
pub fn seed_demo_if_empty(conn: &Connection) -> Result<()> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM recipes", [], |row| row.get(0))
        .context("Failed to count recipes")?;
    if count > 0 {
        return Ok(());
    }

    add_recipe(
        conn,
        "Омлет с сыром",
        "Взбить яйца, добавить соль, перец. Обжарить на сковороде, посыпать сыром, сложить пополам.",
        &[ing("яйца", 3.0, "шт"), ing("сыр", 50.0, "г"), ing("молоко", 30.0, "мл")],
        Some(10),
        Some("легко"),
    )?;
    add_recipe(
        conn,
        "Салат греческий",
        "Нарезать помидоры, огурцы, перец, лук, фету; добавить маслины, оливковое масло.",
        &[
            ing("помидоры", 2.0, "шт"),
            ing("огурец", 1.0, "шт"),
            ing("сыр фета", 100.0, "г"),
            ing("маслины", 10.0, "шт"),
        ],
        Some(12),
        Some("легко"),
    )?;
    add_recipe(
        conn,
        "Паста с томатным соусом",
        "Сварить пасту аль денте. Соус: пассеровать чеснок, добавить томаты, уварить, смешать с пастой.",
        &[
            ing("паста", 200.0, "г"),
            ing("томаты", 300.0, "г"),
            ing("чеснок", 2.0, "зубчик"),
        ],
        Some(20),
        Some("средне"),
    )?;
    Ok(())
}

/// Seed the built-in world-recipe set; returns how many were added
pub fn seed_world_recipes(conn: &Connection) -> Result<usize> {
    let mut added = 0;
    let mut put = |title: &str,
                   steps: &str,
                   ings: &[RecipeIngredient],
                   time_min: i64,
                   difficulty: &str|
     -> Result<()> {
        if add_recipe_if_absent(conn, title, steps, ings, Some(time_min), Some(difficulty))?
            .is_some()
        {
            added += 1;
        }
        Ok(())
    };

    put(
        "Пицца Маргарита",
        "Тесто, томатный соус, сверху сыр моцарелла и базилик. Выпекать до румяности.",
        &[
            ing("томаты", 300.0, "г"),
            ing("сыр моцарелла", 150.0, "г"),
            ing("мука", 300.0, "г"),
            ing("дрожжи", 7.0, "г"),
            ing("базилик", 1.0, "пучок"),
            ing("оливковое масло", 2.0, "ст.л."),
        ],
        30,
        "средне",
    )?;
    put(
        "Спагетти Карбонара",
        "Отварить пасту. Обжарить бекон, смешать с яйцами и сыром. Перемешать с пастой.",
        &[
            ing("паста", 250.0, "г"),
            ing("яйца", 2.0, "шт"),
            ing("сыр", 60.0, "г"),
            ing("бекон", 120.0, "г"),
            ing("чеснок", 1.0, "зубчик"),
        ],
        20,
        "легко",
    )?;
    put(
        "Пад тай",
        "Обжарить рисовую лапшу с курицей/креветками, яйцом, арахисом, лаймом и соусом.",
        &[
            ing("рисовая лапша", 200.0, "г"),
            ing("куриное филе", 200.0, "г"),
            ing("яйца", 1.0, "шт"),
            ing("арахис", 30.0, "г"),
            ing("лайм", 1.0, "шт"),
            ing("соевый соус", 2.0, "ст.л."),
        ],
        25,
        "средне",
    )?;
    put(
        "Фо бо",
        "Говяжий бульон, рисовая лапша, говядина, зелень, лайм. Подача с соусами.",
        &[
            ing("говядина", 250.0, "г"),
            ing("рисовая лапша", 200.0, "г"),
            ing("лук", 1.0, "шт"),
            ing("лайм", 1.0, "шт"),
            ing("зелень", 1.0, "пучок"),
        ],
        40,
        "средне",
    )?;
    put(
        "Рамен шою",
        "Куриный/свиной бульон, лапша, соевый соус, яйцо, зелёный лук.",
        &[
            ing("куриный бульон", 1.0, "л"),
            ing("лапша", 200.0, "г"),
            ing("соевый соус", 3.0, "ст.л."),
            ing("яйца", 1.0, "шт"),
            ing("зелёный лук", 1.0, "пучок"),
        ],
        35,
        "средне",
    )?;
    put(
        "Том ям",
        "Кисло-острый суп с креветками, грибами, лаймом и пастой том ям.",
        &[
            ing("креветки", 250.0, "г"),
            ing("грибы", 150.0, "г"),
            ing("лайм", 1.0, "шт"),
            ing("кокосовое молоко", 200.0, "мл"),
            ing("чили", 1.0, "шт"),
        ],
        25,
        "средне",
    )?;
    put(
        "Паэлья",
        "Обжарить рис с шафраном, добавить бульон, морепродукты/курицу и овощи, довести.",
        &[
            ing("рис", 300.0, "г"),
            ing("куриное филе", 200.0, "г"),
            ing("креветки", 200.0, "г"),
            ing("перец", 1.0, "шт"),
            ing("томаты", 200.0, "г"),
        ],
        45,
        "средне",
    )?;
    put(
        "Шакшука",
        "Томаты с луком и специями тушить, сделать лунки, добавить яйца и довести до готовности.",
        &[
            ing("томаты", 400.0, "г"),
            ing("лук", 1.0, "шт"),
            ing("чеснок", 2.0, "зубчик"),
            ing("яйца", 3.0, "шт"),
            ing("перец", 0.5, "шт"),
        ],
        20,
        "легко",
    )?;
    put(
        "Хумус",
        "Измельчить нут с тахини, лимоном, чесноком и оливковым маслом до пасты.",
        &[
            ing("нут", 250.0, "г"),
            ing("тахини", 2.0, "ст.л."),
            ing("лимон", 0.5, "шт"),
            ing("чеснок", 1.0, "зубчик"),
            ing("оливковое масло", 2.0, "ст.л."),
        ],
        15,
        "легко",
    )?;
    put(
        "Салат Цезарь",
        "Салат ромэн, сухарики, пармезан, заправка на основе яйца/анчоуса/масла.",
        &[
            ing("листья салата", 1.0, "кочан"),
            ing("сыр", 50.0, "г"),
            ing("батон", 4.0, "ломтик"),
            ing("яйца", 1.0, "шт"),
            ing("анчоусы", 4.0, "шт"),
        ],
        15,
        "легко",
    )?;
    put(
        "Тако",
        "Обжарить мясо со специями, подать в тортильях с овощами и соусом.",
        &[
            ing("говядина", 250.0, "г"),
            ing("тортильи", 4.0, "шт"),
            ing("лук", 1.0, "шт"),
            ing("томаты", 150.0, "г"),
            ing("перец", 1.0, "шт"),
        ],
        25,
        "легко",
    )?;
    put(
        "Фиш-н-чипс",
        "Филе белой рыбы в кляре обжарить во фритюре. Подача с картофелем фри.",
        &[
            ing("рыба", 300.0, "г"),
            ing("картофель", 400.0, "г"),
            ing("мука", 120.0, "г"),
            ing("яйца", 1.0, "шт"),
            ing("масло растительное", 400.0, "мл"),
        ],
        30,
        "средне",
    )?;

    Ok(added)
}

/// Second built-in set; same idempotence contract as [`seed_world_recipes`]
pub fn seed_more_world_recipes(conn: &Connection) -> Result<usize> {
    let mut added = 0;
    let mut put = |title: &str,
                   steps: &str,
                   ings: &[RecipeIngredient],
                   time_min: i64,
                   difficulty: &str|
     -> Result<()> {
        if add_recipe_if_absent(conn, title, steps, ings, Some(time_min), Some(difficulty))?
            .is_some()
        {
            added += 1;
        }
        Ok(())
    };

    put(
        "Лазанья болоньезе",
        "Слой листов лазаньи, соус болоньезе, соус бешамель и сыр. Запекать до румяности.",
        &[
            ing("фарш говяжий", 400.0, "г"),
            ing("лук", 1.0, "шт"),
            ing("чеснок", 2.0, "зубчик"),
            ing("томаты", 400.0, "г"),
            ing("листы лазаньи", 9.0, "шт"),
            ing("молоко", 400.0, "мл"),
            ing("мука", 2.0, "ст.л."),
            ing("масло сливочное", 40.0, "г"),
            ing("сыр", 120.0, "г"),
        ],
        60,
        "средне",
    )?;
    put(
        "Ризотто с грибами",
        "Обжарить рис арборио с луком, подливать бульон, добавить грибы и сыр.",
        &[
            ing("рис", 300.0, "г"),
            ing("грибы", 250.0, "г"),
            ing("лук", 1.0, "шт"),
            ing("масло сливочное", 40.0, "г"),
            ing("куриный бульон", 1.0, "л"),
            ing("сыр", 60.0, "г"),
        ],
        35,
        "средне",
    )?;
    put(
        "Борщ",
        "Сварить бульон. Обжарить свёклу, морковь, лук, добавить капусту и картофель, томаты.",
        &[
            ing("говядина", 400.0, "г"),
            ing("свёкла", 1.0, "шт"),
            ing("морковь", 1.0, "шт"),
            ing("лук", 1.0, "шт"),
            ing("картофель", 3.0, "шт"),
            ing("капуста", 300.0, "г"),
            ing("томаты", 200.0, "г"),
        ],
        70,
        "средне",
    )?;
    put(
        "Плов",
        "Обжарить мясо с луком и морковью, добавить рис, специи и воду. Томить до готовности.",
        &[
            ing("рис", 400.0, "г"),
            ing("говядина", 500.0, "г"),
            ing("лук", 2.0, "шт"),
            ing("морковь", 2.0, "шт"),
            ing("чеснок", 1.0, "головка"),
            ing("масло растительное", 80.0, "мл"),
        ],
        60,
        "средне",
    )?;
    put(
        "Чили кон карне",
        "Обжарить фарш, добавить фасоль, томаты, кукурузу, специи. Тушить до густоты.",
        &[
            ing("фарш говяжий", 400.0, "г"),
            ing("фасоль", 300.0, "г"),
            ing("кукуруза", 150.0, "г"),
            ing("томаты", 400.0, "г"),
            ing("лук", 1.0, "шт"),
            ing("чили", 1.0, "шт"),
        ],
        35,
        "легко",
    )?;
    put(
        "Минестроне",
        "Томатный овощной суп с фасолью и пастой. Варить до мягкости овощей.",
        &[
            ing("томаты", 400.0, "г"),
            ing("морковь", 1.0, "шт"),
            ing("лук", 1.0, "шт"),
            ing("сельдерей", 1.0, "стебель"),
            ing("фасоль", 200.0, "г"),
            ing("паста", 80.0, "г"),
        ],
        30,
        "легко",
    )?;
    put(
        "Курица терияки",
        "Обжарить курицу, добавить соус терияки, подать с рисом и зелёным луком.",
        &[
            ing("куриное филе", 350.0, "г"),
            ing("соевый соус", 3.0, "ст.л."),
            ing("рис", 200.0, "г"),
            ing("зелёный лук", 1.0, "пучок"),
        ],
        25,
        "легко",
    )?;
    put(
        "Гаспачо",
        "Холодный суп: измельчить томаты, огурец, перец, лук, чеснок, масло и уксус.",
        &[
            ing("томаты", 600.0, "г"),
            ing("огурец", 1.0, "шт"),
            ing("перец", 1.0, "шт"),
            ing("лук", 0.5, "шт"),
            ing("чеснок", 1.0, "зубчик"),
            ing("оливковое масло", 2.0, "ст.л."),
        ],
        15,
        "легко",
    )?;
    put(
        "Сырный крем-суп",
        "Обжарить лук, добавить картофель и бульон. Взбить, вмешать сливки и сыр.",
        &[
            ing("картофель", 400.0, "г"),
            ing("лук", 1.0, "шт"),
            ing("куриный бульон", 800.0, "мл"),
            ing("сливки", 150.0, "мл"),
            ing("сыр", 120.0, "г"),
        ],
        30,
        "легко",
    )?;
    put(
        "Куриный суп-лапша",
        "Бульон с курицей, лапшой, морковью и зеленью. Варить до готовности.",
        &[
            ing("куриное филе", 300.0, "г"),
            ing("куриный бульон", 1.0, "л"),
            ing("лапша", 120.0, "г"),
            ing("морковь", 1.0, "шт"),
            ing("зелень", 1.0, "пучок"),
        ],
        30,
        "легко",
    )?;
    put(
        "Бургеры классические",
        "Сформовать котлеты, обжарить. Собрать с булочкой, сыром и овощами.",
        &[
            ing("фарш говяжий", 400.0, "г"),
            ing("булочки", 4.0, "шт"),
            ing("сыр", 4.0, "ломтик"),
            ing("лук", 1.0, "шт"),
            ing("огурец", 1.0, "шт"),
            ing("томатный соус", 2.0, "ст.л."),
        ],
        20,
        "легко",
    )?;
    put(
        "Шаверма куриная",
        "Обжарить курицу со специями, завернуть в лаваш с овощами и соусом.",
        &[
            ing("куриное филе", 350.0, "г"),
            ing("лаваш", 2.0, "шт"),
            ing("огурец", 1.0, "шт"),
            ing("томаты", 2.0, "шт"),
            ing("чеснок", 1.0, "зубчик"),
            ing("йогурт", 150.0, "г"),
        ],
        25,
        "легко",
    )?;
    put(
        "Суши-ролл Калифорния",
        "Приготовить рис для суши, завернуть с нори, крабом/краб-палочками, авокадо и огурцом.",
        &[
            ing("рис", 250.0, "г"),
            ing("нори", 4.0, "лист"),
            ing("огурец", 1.0, "шт"),
            ing("крабовые палочки", 150.0, "г"),
            ing("майонез", 2.0, "ст.л."),
            ing("соевый соус", 2.0, "ст.л."),
        ],
        40,
        "средне",
    )?;
    put(
        "Панкейки",
        "Смешать яйцо, молоко, муку, разрыхлитель, сахар. Жарить небольшими кружками.",
        &[
            ing("яйца", 1.0, "шт"),
            ing("молоко", 250.0, "мл"),
            ing("мука", 180.0, "г"),
            ing("сахар", 1.5, "ст.л."),
            ing("разрыхлитель", 1.0, "ч.л."),
            ing("масло сливочное", 30.0, "г"),
        ],
        20,
        "легко",
    )?;
    put(
        "Тирамису",
        "Выложить слоями савоярди, крем из маскарпоне и кофе. Охладить и присыпать какао.",
        &[
            ing("печенье савоярди", 200.0, "г"),
            ing("маскарпоне", 250.0, "г"),
            ing("сливки", 200.0, "мл"),
            ing("кофе", 150.0, "мл"),
            ing("какао", 1.0, "ст.л."),
        ],
        30,
        "легко",
    )?;

    Ok(added)
}
