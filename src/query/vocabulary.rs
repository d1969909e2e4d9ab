use std::collections::HashMap;

use lazy_static::lazy_static;

pub const CATEGORIES: &[&str] = &[
    "dress", "shirt", "t-shirt", "blouse", "top", "jeans", "pants", "shorts", "skirt", "jacket",
    "coat", "sweater", "hoodie", "cardigan", "blazer", "suit", "shoes", "sneakers", "boots",
    "sandals", "heels", "handbag", "backpack", "scarf", "belt", "leggings", "swimsuit", "socks",
];

pub const COLORS: &[&str] = &[
    "red", "blue", "green", "black", "white", "yellow", "orange", "purple", "pink", "brown",
    "gray", "grey", "beige", "navy", "maroon", "gold", "silver",
];

pub const MATERIALS: &[&str] = &[
    "cotton", "silk", "wool", "leather", "denim", "linen", "polyester", "cashmere", "suede",
    "velvet", "satin", "nylon",
];

pub const SIZES: &[&str] = &[
    "xs", "s", "m", "l", "xl", "xxl", "small", "medium", "large", "petite",
];

pub const OCCASIONS: &[&str] = &[
    "casual", "formal", "party", "wedding", "work", "office", "beach", "summer", "winter",
    "sport", "evening", "vacation",
];

pub const BRANDS: &[&str] = &[
    "nike", "adidas", "puma", "reebok", "gucci", "prada", "zara", "levis", "levi's", "uniqlo",
    "h&m",
];

// Everyday query words. They count as known so the fuzzy matcher leaves them
// alone ("deals" is two edits from "heels"), but are never correction targets.
pub const COMMON_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "for", "with", "in", "on", "of", "to", "my", "new",
    "under", "below", "less", "than", "between", "price", "size", "color",
    "men", "women", "mens", "womens", "kids",
    "buy", "purchase", "cheap", "cheapest", "discount", "discounts", "sale", "sales", "deal",
    "deals", "offer", "offers",
    "compare", "comparison", "vs", "versus", "difference", "best", "review", "reviews", "which",
];

lazy_static! {
    pub static ref CORRECTIONS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("blu", "blue");
        m.insert("bleu", "blue");
        m.insert("blak", "black");
        m.insert("whit", "white");
        m.insert("gren", "green");
        m.insert("purpel", "purple");
        m.insert("dres", "dress");
        m.insert("dresss", "dress");
        m.insert("jean", "jeans");
        m.insert("jens", "jeans");
        m.insert("shrt", "shirt");
        m.insert("tshirt", "t-shirt");
        m.insert("tshirts", "t-shirt");
        m.insert("jaket", "jacket");
        m.insert("sneeker", "sneakers");
        m.insert("sneekers", "sneakers");
        m.insert("shooes", "shoes");
        m.insert("pnts", "pants");
        m.insert("sweter", "sweater");
        m.insert("hoody", "hoodie");
        m.insert("leathr", "leather");
        m.insert("cotten", "cotton");
        m.insert("casul", "casual");
        m.insert("formel", "formal");
        m.insert("wedng", "wedding");
        m.insert("addidas", "adidas");
        m.insert("nikey", "nike");
        m
    };

    pub static ref SYNONYMS: HashMap<&'static str, Vec<&'static str>> = {
        let mut m = HashMap::new();
        m.insert("dress", vec!["gown", "frock", "sundress"]);
        m.insert("shirt", vec!["top", "tee", "button-down"]);
        m.insert("t-shirt", vec!["tee", "top"]);
        m.insert("jeans", vec!["denim", "denim pants"]);
        m.insert("pants", vec!["trousers", "slacks"]);
        m.insert("jacket", vec!["coat", "outerwear"]);
        m.insert("sweater", vec!["pullover", "jumper", "knitwear"]);
        m.insert("hoodie", vec!["sweatshirt", "pullover"]);
        m.insert("shoes", vec!["footwear", "sneakers"]);
        m.insert("sneakers", vec!["trainers", "athletic shoes"]);
        m.insert("boots", vec!["booties", "ankle boots"]);
        m.insert("handbag", vec!["purse", "tote", "shoulder bag"]);
        m.insert("skirt", vec!["midi skirt", "mini skirt"]);
        m.insert("swimsuit", vec!["swimwear", "bathing suit"]);
        m
    };

    pub static ref VARIATIONS: HashMap<&'static str, Vec<&'static str>> = {
        let mut m = HashMap::new();
        m.insert("red", vec!["crimson", "scarlet", "burgundy"]);
        m.insert("blue", vec!["navy", "azure", "cobalt"]);
        m.insert("green", vec!["olive", "emerald", "mint"]);
        m.insert("black", vec!["charcoal", "jet black"]);
        m.insert("white", vec!["ivory", "cream", "off-white"]);
        m.insert("gray", vec!["grey", "charcoal", "slate"]);
        m.insert("grey", vec!["gray", "charcoal", "slate"]);
        m.insert("pink", vec!["rose", "blush", "fuchsia"]);
        m.insert("purple", vec!["violet", "lavender", "plum"]);
        m.insert("brown", vec!["tan", "camel", "chocolate"]);
        m.insert("yellow", vec!["mustard", "lemon"]);
        m.insert("orange", vec!["coral", "rust"]);
        m.insert("beige", vec!["khaki", "sand", "nude"]);
        m
    };
}
