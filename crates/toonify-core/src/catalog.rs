//! Static style and artist catalog.
//!
//! Styles carry the prompt fragment that anchors every generation request;
//! artists are blended in by name. Both tables are immutable and ordered:
//! the first style is the default, and artist search preserves roster order.

use serde::{Deserialize, Serialize};

/// Visual style identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArtStyle {
    #[serde(rename = "Classic Comic Book")]
    ClassicComic,
    #[serde(rename = "Vibrant Anime/Manga")]
    AnimeManga,
    #[serde(rename = "3D Animation Movie")]
    Pixar3d,
    #[serde(rename = "Lichtenstein Pop Art")]
    PopArt,
    #[serde(rename = "Neon Cyberpunk Toon")]
    Cyberpunk,
    #[serde(rename = "Artistic Watercolor Illustration")]
    Watercolor,
    #[serde(rename = "Hand-drawn Charcoal Sketch")]
    Sketch,
}

impl ArtStyle {
    /// Every style identifier, including ones without a catalog entry yet.
    pub const ALL: [ArtStyle; 7] = [
        ArtStyle::ClassicComic,
        ArtStyle::AnimeManga,
        ArtStyle::Pixar3d,
        ArtStyle::PopArt,
        ArtStyle::Cyberpunk,
        ArtStyle::Watercolor,
        ArtStyle::Sketch,
    ];

    /// Human-readable identifier, as serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClassicComic => "Classic Comic Book",
            Self::AnimeManga => "Vibrant Anime/Manga",
            Self::Pixar3d => "3D Animation Movie",
            Self::PopArt => "Lichtenstein Pop Art",
            Self::Cyberpunk => "Neon Cyberpunk Toon",
            Self::Watercolor => "Artistic Watercolor Illustration",
            Self::Sketch => "Hand-drawn Charcoal Sketch",
        }
    }

    /// Stable kebab-case key used on the command line and in config.
    pub fn key(&self) -> &'static str {
        match self {
            Self::ClassicComic => "classic-comic",
            Self::AnimeManga => "anime-manga",
            Self::Pixar3d => "pixar-3d",
            Self::PopArt => "pop-art",
            Self::Cyberpunk => "cyberpunk",
            Self::Watercolor => "watercolor",
            Self::Sketch => "sketch",
        }
    }

    /// Parse a style from its key (case-insensitive).
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_lowercase();
        Self::ALL.into_iter().find(|style| style.key() == key)
    }
}

impl std::fmt::Display for ArtStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A selectable style with its generation prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleOption {
    pub id: ArtStyle,
    pub name: &'static str,
    pub description: &'static str,
    pub preview_url: &'static str,
    pub prompt: &'static str,
}

/// An illustrator whose visual signature can be blended into a generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artist {
    pub name: &'static str,
    pub specialty: &'static str,
}

impl Artist {
    /// Case-insensitive substring match over name and specialty.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term) || self.specialty.to_lowercase().contains(&term)
    }
}

/// Styles offered by the studio. The first entry is the default.
pub static ART_STYLES: &[StyleOption] = &[
    StyleOption {
        id: ArtStyle::ClassicComic,
        name: "Classic Comic",
        description: "Bold outlines, high contrast, and retro Ben-Day dots.",
        preview_url: "https://picsum.photos/seed/comic/400/400",
        prompt: "Transform this photo into a highly stylized classic 1960s comic book illustration. \
                 Use heavy, thick black ink outlines and vibrant, non-realistic primary colors. \
                 This must look like hand-drawn art on paper, completely avoiding any photographic realism.",
    },
    StyleOption {
        id: ArtStyle::Pixar3d,
        name: "3D Animation",
        description: "Modern 3D movie look with soft lighting.",
        preview_url: "https://picsum.photos/seed/pixar/400/400",
        prompt: "Convert this image into a stylized 3D animated movie character. \
                 Use expressive, exaggerated features and smooth, simplified textures. \
                 It should look like a character from a high-end animation studio, not a realistic human.",
    },
    StyleOption {
        id: ArtStyle::AnimeManga,
        name: "Anime/Manga",
        description: "Vibrant Japanese animation style.",
        preview_url: "https://picsum.photos/seed/anime/400/400",
        prompt: "Redraw this photo as a vibrant Japanese Anime or Manga illustration. \
                 Use sharp cel-shading, stylized linework, and dramatic, non-photorealistic lighting. \
                 The final result must be a 2D drawing.",
    },
];

/// Illustrator roster, in display order.
#[rustfmt::skip]
pub static ARTISTS: &[Artist] = &[
    Artist { name: "Todd McFarlane", specialty: "Intricate detail, dark atmospheres, flowing capes" },
    Artist { name: "Jim Lee", specialty: "Heroic anatomy, dynamic cross-hatching" },
    Artist { name: "Rob Liefeld", specialty: "Extreme energy, exaggerated anatomy, many pouches" },
    Artist { name: "Marc Silvestri", specialty: "Elegant line work, high-fashion aesthetic" },
    Artist { name: "Erik Larsen", specialty: "Golden-age energy, bold muscularity" },
    Artist { name: "Whilce Portacio", specialty: "Tech-organic details, gritty textures" },
    Artist { name: "Jim Valentino", specialty: "Clean, classic superhero lines" },
    Artist { name: "Greg Capullo", specialty: "Gothic energy, expressive faces" },
    Artist { name: "Stephen Platt", specialty: "Hyper-detailed rendering" },
    Artist { name: "J. Scott Campbell", specialty: "Stylized, elongated figures, clean lines" },
    Artist { name: "Brett Booth", specialty: "Hyper-dynamic poses, intricate hatching" },
    Artist { name: "Sam Kieth", specialty: "Abstract, exaggerated proportions, surrealism" },
    Artist { name: "Travis Charest", specialty: "European-influenced ultra-detail" },
    Artist { name: "Dale Keown", specialty: "Massive muscular power, realistic lighting" },
    Artist { name: "Tony Daniel", specialty: "Polished, modern DC-style aesthetic" },
    Artist { name: "Bart Sears", specialty: "Vast, powerful anatomy" },
    Artist { name: "Jae Lee", specialty: "Stylized, silhouette-heavy gothic art" },
    Artist { name: "Ryan Ottley", specialty: "High-octane kinetic energy, visceral detail" },
    Artist { name: "Charlie Adlard", specialty: "Gritty, realistic charcoal/ink feel" },
    Artist { name: "Fiona Staples", specialty: "Clean, digital-paint hybrid, unique palette" },
    Artist { name: "Jamie McKelvie", specialty: "Perfect clean-line pop aesthetic" },
    Artist { name: "Sean Phillips", specialty: "Gritty noir, heavy shadows" },
    Artist { name: "Frank Quitely", specialty: "Unique textural line work, distinct anatomy" },
    Artist { name: "Jerome Opeña", specialty: "Atmospheric painterly textures" },
    Artist { name: "Matteo Scalera", specialty: "Sharp, angular dynamic movement" },
    Artist { name: "Wes Craig", specialty: "Experimental layouts, bold flat colors" },
    Artist { name: "Rob Guillory", specialty: "Stylized, cartoonish, expressive energy" },
    Artist { name: "Dustin Nguyen", specialty: "Soft watercolor comic style" },
    Artist { name: "Cliff Chiang", specialty: "Iconic, graphic design-oriented lines" },
    Artist { name: "Jock", specialty: "High-contrast, abstract energy, ink splatters" },
    Artist { name: "Christian Ward", specialty: "Psychedelic colors, cosmic energy" },
    Artist { name: "Skottie Young", specialty: "Whimsical, baby-variant aesthetic" },
    Artist { name: "Gabriel Bá", specialty: "European-infused, rhythmic line work" },
    Artist { name: "Fábio Moon", specialty: "Atmospheric, poetic brushstrokes" },
    Artist { name: "Nick Dragotta", specialty: "Retro-futuristic, clean Manga influence" },
    Artist { name: "Greg Tocchini", specialty: "Abstract, painterly sci-fi art" },
    Artist { name: "Tula Lotay", specialty: "Ethereal, layered watercolor/pencil" },
    Artist { name: "Jason Latour", specialty: "Punchy, gritty street aesthetic" },
    Artist { name: "Ryan Stegman", specialty: "90s influence, high detail, sharp lines" },
    Artist { name: "Cory Walker", specialty: "Clean, efficiency-driven lines" },
    Artist { name: "Martin Simmonds", specialty: "Mixed-media, collage, unsettling noir" },
    Artist { name: "Daniel Warren Johnson", specialty: "Hyper-kinetic energy, sound-effect heavy" },
    Artist { name: "Zoe Thorogood", specialty: "Raw, emotional, sketchbook style" },
    Artist { name: "Alvaro Martinez Bueno", specialty: "Detailed, atmospheric modern horror" },
    Artist { name: "Sana Takeda", specialty: "Ornate, detailed digital painting/Manga" },
    Artist { name: "Elsa Charretier", specialty: "Classic golden age/Darwin Cooke vibe" },
    Artist { name: "Sanford Greene", specialty: "Hip-hop energy, graffiti influenced lines" },
    Artist { name: "Jakub Rebelka", specialty: "Detailed, medieval sci-fi hybrid" },
    Artist { name: "Peach Momoko", specialty: "Traditional Japanese ink and watercolor" },
    Artist { name: "Artyom Topilin", specialty: "Gritty, textured indie aesthetic" },
    Artist { name: "Jason Shawn Alexander", specialty: "Dark, expressive, ink-heavy realism" },
];

/// Cosmetic status lines shown while a transformation is in flight.
pub const LOADING_MESSAGES: &[&str] = &[
    "Mixing the ink...",
    "Blending the palettes...",
    "Studying the pencil work...",
    "Applying legendary cross-hatching...",
    "Summoning the art gods...",
    "Inking the final pages...",
];

/// The style selected when a studio starts.
pub fn default_style() -> &'static StyleOption {
    &ART_STYLES[0]
}

/// Look up the catalog entry for a style identifier.
pub fn style(id: ArtStyle) -> Option<&'static StyleOption> {
    ART_STYLES.iter().find(|option| option.id == id)
}

/// Look up a catalog entry by its key (e.g. `"anime-manga"`).
pub fn style_by_key(key: &str) -> Option<&'static StyleOption> {
    ArtStyle::from_key(key).and_then(style)
}

/// Find an artist by exact name, ignoring case.
pub fn artist(name: &str) -> Option<&'static Artist> {
    let name = name.trim();
    ARTISTS.iter().find(|a| a.name.eq_ignore_ascii_case(name))
}

/// Filter the roster by a free-text search term.
///
/// An empty term returns the whole roster in order.
pub fn search_artists(term: &str) -> Vec<&'static Artist> {
    ARTISTS.iter().filter(|a| a.matches(term)).collect()
}
