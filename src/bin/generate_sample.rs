/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

// Country pool with rough market weights. A couple of names are deliberately
// absent from the normalization asset to exercise the identity fallback.
const COUNTRIES: &[(&str, u32)] = &[
    ("France", 22),
    ("États-Unis", 18),
    ("Royaume-Uni", 12),
    ("Allemagne", 10),
    ("Italie", 8),
    ("Espagne", 6),
    ("Japon", 5),
    ("Chine", 5),
    ("Suisse", 4),
    ("Belgique", 3),
    ("Pays-Bas", 3),
    ("Brésil", 2),
    ("Géorgie", 1),
    ("Islande", 1),
];

const MEDIUMS: &[&str] = &[
    "peinture",
    "peinture",
    "sculpture",
    "photographie",
    "estampe",
    "dessin",
];

const FIRST_NAMES: &[&str] = &[
    "Claire", "Hugo", "Marcel", "Inès", "Theo", "Louise", "Pablo", "Anna", "Kenji", "Marta",
    "Otto", "Vera", "Jean", "Sofia", "Henrik", "Camille",
];

const LAST_NAMES: &[&str] = &[
    "Moreau", "Dubois", "Keller", "Rossi", "Tanaka", "Weber", "Fontaine", "Alvarez", "Novak",
    "Lindqvist", "Petit", "Garnier", "Sato", "Blanc", "Richter", "Costa",
];

fn weighted_country(rng: &mut SimpleRng) -> &'static str {
    let total: u32 = COUNTRIES.iter().map(|(_, w)| w).sum();
    let mut roll = (rng.next_u64() % u64::from(total)) as u32;
    for (name, weight) in COUNTRIES {
        if roll < *weight {
            return name;
        }
        roll -= weight;
    }
    COUNTRIES[0].0
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let n_artists = 400;

    struct Row {
        artist_id: i64,
        artist_name: String,
        main_country: &'static str,
        main_medium: &'static str,
        ca: f64,
        year_birth: Option<i32>,
    }

    let mut rows: Vec<Row> = (0..n_artists)
        .map(|i| {
            let name = format!(
                "{} {}",
                rng.pick(FIRST_NAMES),
                rng.pick(LAST_NAMES)
            );
            let ca = (rng.gauss(10.5, 1.2).exp() * 100.0).round() / 100.0;
            let year_birth = if rng.next_f64() < 0.06 {
                None
            } else {
                Some(rng.gauss(1945.0, 28.0).round().clamp(1850.0, 2004.0) as i32)
            };
            Row {
                artist_id: 1000 + i,
                artist_name: name,
                main_country: weighted_country(&mut rng),
                main_medium: *rng.pick(MEDIUMS),
                ca,
                year_birth,
            }
        })
        .collect();

    // A handful of artists appear twice (a second listed sale), so
    // artist_id is not unique per row.
    for i in 0..10 {
        let src = &rows[i * 37 % rows.len()];
        let dup = Row {
            artist_id: src.artist_id,
            artist_name: src.artist_name.clone(),
            main_country: src.main_country,
            main_medium: src.main_medium,
            ca: (src.ca * 0.6 * 100.0).round() / 100.0,
            year_birth: src.year_birth,
        };
        rows.push(dup);
    }

    // Rank follows revenue, with occasional ties.
    rows.sort_by(|a, b| b.ca.total_cmp(&a.ca));
    let mut ranks: Vec<i64> = Vec::with_capacity(rows.len());
    for i in 0..rows.len() {
        if i > 0 && rng.next_f64() < 0.05 {
            ranks.push(ranks[i - 1]);
        } else {
            ranks.push(i as i64 + 1);
        }
    }

    let output_path = "artists.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record([
            "artist_id",
            "artist_name",
            "main_country",
            "main_medium",
            "rank",
            "ca",
            "year_birth",
        ])
        .expect("Failed to write header");

    for (row, rank) in rows.iter().zip(&ranks) {
        let year = row.year_birth.map(|y| y.to_string()).unwrap_or_default();
        writer
            .write_record([
                row.artist_id.to_string(),
                row.artist_name.clone(),
                row.main_country.to_string(),
                row.main_medium.to_string(),
                rank.to_string(),
                format!("{:.2}", row.ca),
                year,
            ])
            .expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush output");

    println!("Wrote {} rows to {output_path}", rows.len());
}
