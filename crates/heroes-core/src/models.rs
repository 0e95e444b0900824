use serde::{Deserialize, Serialize};

pub type HeroId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroRecord {
    pub id: HeroId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub powerstats: Powerstats,
    #[serde(default)]
    pub appearance: Appearance,
    #[serde(default)]
    pub biography: Biography,
    #[serde(default)]
    pub work: Work,
    #[serde(default)]
    pub connections: Connections,
    #[serde(default)]
    pub images: HeroImages,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Powerstats {
    pub intelligence: Option<u32>,
    pub strength: Option<u32>,
    pub speed: Option<u32>,
    pub durability: Option<u32>,
    pub power: Option<u32>,
    pub combat: Option<u32>,
}

impl Powerstats {
    pub fn entries(&self) -> [(&'static str, Option<u32>); 6] {
        [
            ("intelligence", self.intelligence),
            ("strength", self.strength),
            ("speed", self.speed),
            ("durability", self.durability),
            ("power", self.power),
            ("combat", self.combat),
        ]
    }

    pub fn total(&self) -> u32 {
        self.entries()
            .iter()
            .filter_map(|(_, value)| *value)
            .sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appearance {
    pub gender: Option<String>,
    pub race: Option<String>,
    #[serde(default)]
    pub height: [String; 2],
    #[serde(default)]
    pub weight: [String; 2],
    pub eye_color: Option<String>,
    pub hair_color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Biography {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub alter_egos: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub place_of_birth: String,
    #[serde(default)]
    pub first_appearance: String,
    pub publisher: Option<String>,
    #[serde(default)]
    pub alignment: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Work {
    #[serde(default)]
    pub occupation: String,
    #[serde(default)]
    pub base: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connections {
    #[serde(default)]
    pub group_affiliation: String,
    #[serde(default)]
    pub relatives: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroImages {
    #[serde(default)]
    pub xs: String,
    #[serde(default)]
    pub sm: String,
    #[serde(default)]
    pub md: String,
    #[serde(default)]
    pub lg: String,
}
