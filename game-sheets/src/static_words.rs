/// Compiled-in word table for local mode, in the same 13-cell layout the
/// remote sheet uses: answer, then up to four (category, hint, emoji)
/// triples. Some rows are deliberately sparse.
pub const STATIC_WORDS: &[[&str; 13]] = &[
    [
        "apple",
        "fruit", "A red or green fruit", "🍎",
        "snack", "Often packed in lunchboxes", "🥪",
        "tree", "Grows on one", "🌳",
        "", "", "",
    ],
    [
        "piano",
        "music", "It has 88 keys", "🎹",
        "furniture", "Takes up a corner of the living room", "🛋️",
        "wood", "Usually built from this", "🪵",
        "sound", "Hammers and strings make it", "🎵",
    ],
    [
        "volcano",
        "nature", "A mountain with a temper", "🌋",
        "heat", "Molten rock flows from it", "🔥",
        "geography", "Found along plate boundaries", "🗺️",
        "", "", "",
    ],
    [
        "bicycle",
        "transport", "Two wheels, no engine", "🚲",
        "exercise", "Pedalling keeps you fit", "💪",
        "", "", "",
        "balance", "You never forget how", "⚖️",
    ],
    [
        "library",
        "building", "A quiet public place", "🏛️",
        "books", "Full of them, all borrowed", "📚",
        "silence", "Whispering only", "🤫",
        "", "", "",
    ],
    [
        "penguin",
        "animal", "A bird that cannot fly", "🐧",
        "cold", "At home on the ice", "🧊",
        "ocean", "An excellent swimmer", "🌊",
        "formal", "Always in a tuxedo", "🤵",
    ],
    [
        "anchor",
        "ship", "Keeps a vessel in place", "⚓",
        "weight", "Heavy by design", "🏋️",
        "", "", "",
        "", "", "",
    ],
    [
        "lantern",
        "light", "Carried to see in the dark", "🏮",
        "camping", "Hangs in the tent", "⛺",
        "festival", "Released into the night sky", "🎆",
        "", "", "",
    ],
];
