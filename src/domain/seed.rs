//! Built-in catalog contents.

use crate::domain::catalog::{Beer, BjcpStyle, Brewery, Vitals};

struct StyleSeed {
    code: &'static str,
    name: &'static str,
    category: &'static str,
    overall_impression: &'static str,
    appearance: &'static str,
    aroma: &'static str,
    flavor: &'static str,
    mouthfeel: &'static str,
    commercial_examples: &'static [&'static str],
    abv: (f64, f64),
    ibu: (u32, u32),
    srm: (f64, f64),
    og: (f64, f64),
    fg: (f64, f64),
}

impl From<StyleSeed> for BjcpStyle {
    fn from(seed: StyleSeed) -> Self {
        Self {
            code: seed.code.to_string(),
            name: seed.name.to_string(),
            category: seed.category.to_string(),
            overall_impression: seed.overall_impression.to_string(),
            appearance: seed.appearance.to_string(),
            aroma: seed.aroma.to_string(),
            flavor: seed.flavor.to_string(),
            mouthfeel: seed.mouthfeel.to_string(),
            commercial_examples: seed
                .commercial_examples
                .iter()
                .map(|example| example.to_string())
                .collect(),
            vitals: Vitals {
                abv_min: seed.abv.0,
                abv_max: seed.abv.1,
                ibu_min: seed.ibu.0,
                ibu_max: seed.ibu.1,
                srm_min: seed.srm.0,
                srm_max: seed.srm.1,
                og_min: seed.og.0,
                og_max: seed.og.1,
                fg_min: seed.fg.0,
                fg_max: seed.fg.1,
            },
        }
    }
}

pub fn styles() -> Vec<BjcpStyle> {
    [
        StyleSeed {
            code: "1A",
            name: "American Light Lager",
            category: "Standard American Beer",
            overall_impression: "A highly carbonated, very light-bodied, nearly flavorless lager designed to be consumed very cold.",
            appearance: "Very pale straw to pale yellow color. White, frothy head seldom persists.",
            aroma: "Low malt aroma optional. Hop aroma may range from none to a light, spicy or floral character.",
            flavor: "Relatively neutral palate with a crisp and dry finish and a low to very low grainy or corn-like flavor.",
            mouthfeel: "Very light, sometimes watery, body. Very highly carbonated.",
            commercial_examples: &["Bud Light", "Coors Light", "Miller Lite"],
            abv: (2.8, 4.2),
            ibu: (8, 12),
            srm: (2.0, 3.0),
            og: (1.028, 1.040),
            fg: (0.998, 1.008),
        },
        StyleSeed {
            code: "5D",
            name: "German Pils",
            category: "Pale Bitter European Beer",
            overall_impression: "A light-bodied, highly-attenuated, gold-colored, bottom-fermented bitter German beer.",
            appearance: "Straw to light gold, brilliant to very clear, with a creamy, long-lasting white head.",
            aroma: "Medium-low to low grainy-sweet-rich malt character and distinctive flowery, spicy, or herbal hops.",
            flavor: "Medium to high hop bitterness dominates the palate and lingers into the aftertaste.",
            mouthfeel: "Medium-light body. Medium to high carbonation.",
            commercial_examples: &["Bitburger", "König Pilsener", "Trumer Pils"],
            abv: (4.4, 5.2),
            ibu: (22, 40),
            srm: (2.0, 4.0),
            og: (1.044, 1.050),
            fg: (1.008, 1.013),
        },
        StyleSeed {
            code: "10A",
            name: "Weissbier",
            category: "German Wheat Beer",
            overall_impression: "A pale, refreshing German wheat beer with high carbonation, dry finish and a fluffy mouthfeel.",
            appearance: "Pale straw to gold in color. A very thick, moussy, long-lasting white head is characteristic.",
            aroma: "Moderate to strong phenols, usually clove, and fruity esters, typically banana.",
            flavor: "Low to moderately strong banana and clove flavor with a soft, grainy-bready wheat flavor.",
            mouthfeel: "Medium-light to medium body; never heavy. Highly carbonated.",
            commercial_examples: &["Ayinger Bräu Weisse", "Schneider Weisse Original", "Weihenstephaner Hefeweissbier"],
            abv: (4.3, 5.6),
            ibu: (8, 15),
            srm: (2.0, 6.0),
            og: (1.044, 1.053),
            fg: (1.008, 1.014),
        },
        StyleSeed {
            code: "16A",
            name: "Sweet Stout",
            category: "Dark British Beer",
            overall_impression: "A very dark, sweet, full-bodied, slightly roasty ale that can suggest coffee-and-cream.",
            appearance: "Very dark brown to black in color. Creamy tan to brown head.",
            aroma: "Mild roasted grain aroma, sometimes with coffee and/or chocolate notes.",
            flavor: "Dark roasted grains and malts dominate the flavor with a medium to high sweetness.",
            mouthfeel: "Medium-full to full-bodied and creamy. Low to moderate carbonation.",
            commercial_examples: &["Left Hand Milk Stout", "Mackeson's XXX Stout", "Castle Milk Stout"],
            abv: (4.0, 6.0),
            ibu: (20, 40),
            srm: (30.0, 40.0),
            og: (1.044, 1.060),
            fg: (1.012, 1.024),
        },
        StyleSeed {
            code: "18B",
            name: "American Pale Ale",
            category: "Pale American Ale",
            overall_impression: "A pale, refreshing and hoppy ale, yet with sufficient supporting malt to make the beer balanced and drinkable.",
            appearance: "Pale golden to light amber. Moderately large white to off-white head with good retention.",
            aroma: "Moderate to strong hop aroma from American or New World hop varieties.",
            flavor: "Moderate to high hop flavor. Low to moderate clean grainy malt character supports the hop presentation.",
            mouthfeel: "Medium-light to medium body. Moderate to high carbonation.",
            commercial_examples: &["Deschutes Mirror Pond Pale Ale", "Sierra Nevada Pale Ale", "Three Floyds Zombie Dust"],
            abv: (4.5, 6.2),
            ibu: (30, 50),
            srm: (5.0, 10.0),
            og: (1.045, 1.060),
            fg: (1.010, 1.015),
        },
        StyleSeed {
            code: "19B",
            name: "California Common",
            category: "Amber and Brown American Beer",
            overall_impression: "A lightly fruity beer with firm, grainy maltiness, interesting toasty and caramel flavors, and showcasing rustic, traditional American hop characteristics.",
            appearance: "Medium amber to light copper color. Generally clear. Moderate off-white head with good retention.",
            aroma: "Moderate to high hop aroma featuring rustic traditional American hops.",
            flavor: "Moderately malty with a pronounced hop bitterness. The malt character is usually toasty and caramelly.",
            mouthfeel: "Medium-bodied. Medium to medium-high carbonation.",
            commercial_examples: &["Anchor Steam", "Flying Dog Old Scratch Amber Lager"],
            abv: (4.5, 5.5),
            ibu: (30, 45),
            srm: (9.0, 14.0),
            og: (1.048, 1.054),
            fg: (1.011, 1.014),
        },
        StyleSeed {
            code: "21A",
            name: "American IPA",
            category: "IPA",
            overall_impression: "A decidedly hoppy and bitter, moderately strong American pale ale, showcasing modern American or New World hop varieties.",
            appearance: "Color ranging from medium gold to light reddish-amber. Should be clear. Medium-sized, white to off-white head with good persistence.",
            aroma: "A prominent to intense hop aroma featuring one or more characteristics of American or New World hops.",
            flavor: "Hop flavor is medium to very high. Medium-high to very high hop bitterness.",
            mouthfeel: "Medium-light to medium body, with a smooth texture. Medium to medium-high carbonation.",
            commercial_examples: &["Bell's Two-Hearted Ale", "Fat Heads Head Hunter IPA", "Russian River Blind Pig IPA"],
            abv: (5.5, 7.5),
            ibu: (40, 70),
            srm: (6.0, 14.0),
            og: (1.056, 1.070),
            fg: (1.008, 1.014),
        },
        StyleSeed {
            code: "22A",
            name: "Double IPA",
            category: "Strong American Ale",
            overall_impression: "An intensely hoppy, fairly strong pale ale without the big, rich, complex maltiness and residual sweetness of an American barleywine.",
            appearance: "Color ranges from golden to light orange-copper. Good clarity. Moderate-sized, persistent, white to off-white head.",
            aroma: "A prominent to intense hop aroma that typically showcases American or New World hop characteristics.",
            flavor: "Hop flavor is strong and complex. High to absurdly high hop bitterness.",
            mouthfeel: "Medium-light to medium body. Medium to medium-high carbonation.",
            commercial_examples: &["Russian River Pliny the Elder", "Stone Ruination Double IPA 2.0"],
            abv: (7.5, 10.0),
            ibu: (60, 100),
            srm: (6.0, 14.0),
            og: (1.065, 1.085),
            fg: (1.008, 1.018),
        },
        StyleSeed {
            code: "24A",
            name: "Witbier",
            category: "Belgian Ale",
            overall_impression: "A refreshing, elegant, tasty, moderate-strength wheat-based ale.",
            appearance: "Very pale straw to very light gold in color. Very cloudy with starch haze and/or yeast.",
            aroma: "Moderate malty sweetness, often with light notes of honey and/or vanilla. Coriander and orange peel are common.",
            flavor: "Pleasant malty-sweet grain flavor with a zesty, orange-citrusy fruitiness.",
            mouthfeel: "Medium-light to medium body, often having a smoothness and light creaminess from unmalted wheat.",
            commercial_examples: &["Allagash White", "Hoegaarden Wit", "St. Bernardus Wit"],
            abv: (4.5, 5.5),
            ibu: (8, 20),
            srm: (2.0, 4.0),
            og: (1.044, 1.052),
            fg: (1.008, 1.012),
        },
    ]
    .into_iter()
    .map(BjcpStyle::from)
    .collect()
}

pub fn breweries() -> Vec<Brewery> {
    [
        ("SAB - Newlands Brewery", "large", "3 Main Road", "Cape Town", "Western Cape", "7700", "+27 21 658 7440", "https://www.castlelager.co.za"),
        ("SAB - Alrode Brewery", "large", "Alrode South", "Alberton", "Gauteng", "1451", "", "https://www.sab.co.za"),
        ("SAB - Prospecton Brewery", "large", "Prospecton Road", "Durban", "KwaZulu-Natal", "4110", "", "https://www.sab.co.za"),
        ("Afro Caribbean Brewing Co. (ACBC)", "micro", "Kenilworth", "Cape Town", "Western Cape", "7708", "", "https://acbc.co.za"),
        ("Aegir Project Brewery", "brewpub", "Noordhoek Farm Village", "Cape Town", "Western Cape", "7979", "", "https://aegirproject.co.za"),
        ("Anvil Ale House", "brewpub", "Dullstroom", "Dullstroom", "Mpumalanga", "1110", "", "https://anvilalehouse.co.za"),
        ("Cape Brewing Company (CBC)", "regional", "Spice Route, Suid-Agter-Paarl Road", "Paarl", "Western Cape", "7646", "", "https://capebrewing.co.za"),
        ("Clarens Brewery", "micro", "Main Street", "Clarens", "Free State", "9707", "", "https://clarensbrewery.co.za"),
        ("Darling Brew", "micro", "48 Caledon Street", "Darling", "Western Cape", "7345", "", "https://darlingbrew.co.za"),
        ("Devil's Peak Brewing Company", "micro", "95 Durham Avenue, Salt River", "Cape Town", "Western Cape", "7925", "", "https://devilspeakbrewing.co.za"),
        ("Drifter Brewing Company", "micro", "156 Victoria Road, Woodstock", "Cape Town", "Western Cape", "7925", "", "https://drifterbrewing.co.za"),
    ]
    .into_iter()
    .map(|(name, brewery_type, street, city, state, postal_code, phone, website_url)| Brewery {
        name: name.to_string(),
        brewery_type: brewery_type.to_string(),
        street: street.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        postal_code: postal_code.to_string(),
        country: "South Africa".to_string(),
        phone: phone.to_string(),
        website_url: website_url.to_string(),
    })
    .collect()
}

pub fn beers() -> Vec<Beer> {
    let breweries = breweries();
    let city_of = |brewery: &str| {
        breweries
            .iter()
            .find(|candidate| candidate.name == brewery)
            .map(|candidate| candidate.city.clone())
            .unwrap_or_default()
    };

    [
        ("Castle Lager", "SAB - Newlands Brewery", "Pale Lager", 5.0, 18, "The iconic South African lager, crisp and clean with a balanced flavour."),
        ("Carling Black Label", "SAB - Alrode Brewery", "Pale Lager", 5.5, 20, "A full-bodied and rewarding lager celebrated for its champion taste."),
        ("Hansa Pilsner", "SAB - Prospecton Brewery", "Pilsner", 4.5, 22, "A classic pilsner with a distinctive Saaz hop aroma and a crisp finish."),
        ("Castle Lite", "SAB - Alrode Brewery", "Light Lager", 4.0, 12, "A premium light lager, extra cold-lagered for a clean taste."),
        ("Castle Milk Stout", "SAB - Newlands Brewery", "Milk Stout", 6.0, 25, "A smooth, creamy stout with roasted malt and a hint of sweetness."),
        ("Jungle Paradise", "Afro Caribbean Brewing Co. (ACBC)", "Hazy IPA", 6.0, 45, "A juicy, hazy IPA bursting with tropical fruit."),
        ("Space Invader", "Afro Caribbean Brewing Co. (ACBC)", "American Pale Ale", 5.0, 35, "A bright pale ale with citrus hop character."),
        ("California Steamin'", "Aegir Project Brewery", "California Common", 5.0, 35, "A toasty, amber steam beer fermented warm with lager yeast."),
        ("Giant's IPA", "Aegir Project Brewery", "American IPA", 6.5, 60, "A bold American IPA with resinous pine and grapefruit."),
        ("Anvil Pale Ale", "Anvil Ale House", "American Pale Ale", 5.2, 38, "A balanced pale ale brewed in the Mpumalanga highlands."),
        ("White Anvil", "Anvil Ale House", "Witbier", 4.8, 14, "A hazy Belgian-style wheat beer with coriander and orange peel."),
        ("Amber Weiss", "Cape Brewing Company (CBC)", "Weissbier", 5.4, 12, "A Bavarian-style wheat beer with banana and clove notes."),
        ("Clarens IPA", "Clarens Brewery", "American IPA", 6.0, 55, "A hop-forward IPA from the foot of the Maluti mountains."),
        ("Warlord Imperial IPA", "Darling Brew", "Imperial IPA", 9.0, 80, "A big, bold imperial IPA with layers of hops and malt."),
        ("Slow Beer", "Darling Brew", "Lager", 4.0, 16, "An easy-drinking lager brewed to be enjoyed at a slower pace."),
        ("King's Blockhouse IPA", "Devil's Peak Brewing Company", "American IPA", 6.0, 55, "A West Coast style IPA with strong citrus and pine."),
        ("Devil's Peak Lager", "Devil's Peak Brewing Company", "Lager", 4.2, 18, "A crisp, refreshing craft lager."),
        ("Scallywag IPA", "Drifter Brewing Company", "IPA", 6.5, 50, "A hoppy IPA with stone fruit and citrus."),
    ]
    .into_iter()
    .map(|(name, brewery, style, abv, ibu, description)| Beer {
        name: name.to_string(),
        style: style.to_string(),
        city: city_of(brewery),
        brewery: brewery.to_string(),
        country: "South Africa".to_string(),
        abv,
        ibu,
        description: description.to_string(),
    })
    .collect()
}
