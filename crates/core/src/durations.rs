//! Static length table for every audio item the playback harness walks.
//!
//! Lengths are in 1/64-second units at tempo 1, rounded up, so the harness
//! accumulator and the table share one scale. Item identifiers are indices
//! into [`DURATIONS`].

use crate::harness::DurationEntry;

const fn item(name: &'static str, length: u32, looping: bool) -> DurationEntry {
    DurationEntry { name, tempo: 1, length, looping }
}

pub static DURATIONS: &[DurationEntry] = &[
    item("MUS_BERRY_PICK", 2725, true),
    item("MUS_CAUGHT", 892, true),
    item("MUS_CAUGHT_INTRO", 228, false),
    item("MUS_CELADON", 2514, true),
    item("MUS_CINNABAR", 2304, true),
    item("MUS_CREDITS", 15968, false),
    item("MUS_CYCLING", 2193, true),
    item("MUS_DEX_RATING", 212, false),
    item("MUS_DUMMY", 0, false),
    item("MUS_ENCOUNTER_BOY", 998, true),
    item("MUS_ENCOUNTER_DEOXYS", 960, true),
    item("MUS_ENCOUNTER_GIRL", 431, true),
    item("MUS_ENCOUNTER_GYM_LEADER", 562, true),
    item("MUS_ENCOUNTER_RIVAL", 1280, true),
    item("MUS_ENCOUNTER_ROCKET", 553, true),
    item("MUS_EVOLUTION", 2048, true),
    item("MUS_EVOLUTION_INTRO", 64, false),
    item("MUS_EVOLVED", 231, false),
    item("MUS_FOLLOW_ME", 1053, true),
    item("MUS_FUCHSIA", 2176, true),
    item("MUS_GAME_CORNER", 2762, true),
    item("MUS_GAME_FREAK", 557, false),
    item("MUS_GYM", 2160, true),
    item("MUS_HALL_OF_FAME", 1819, true),
    item("MUS_HEAL", 146, false),
    item("MUS_HEAL_UNUSED", 132, false),
    item("MUS_INTRO_FIGHT", 777, false),
    item("MUS_JIGGLYPUFF", 421, false),
    item("MUS_LAVENDER", 5280, true),
    item("MUS_LEVEL_UP", 67, false),
    item("MUS_MOVE_DELETED", 167, false),
    item("MUS_MT_MOON", 5894, true),
    item("MUS_MYSTERY_GIFT", 1115, true),
    item("MUS_NET_CENTER", 2156, true),
    item("MUS_NEW_GAME_EXIT", 128, false),
    item("MUS_NEW_GAME_INSTRUCT", 528, true),
    item("MUS_NEW_GAME_INTRO", 768, true),
    item("MUS_OAK", 2400, true),
    item("MUS_OAK_LAB", 1088, true),
    item("MUS_OBTAIN_BADGE", 320, false),
    item("MUS_OBTAIN_BERRY", 110, false),
    item("MUS_OBTAIN_ITEM", 142, false),
    item("MUS_OBTAIN_KEY_ITEM", 169, false),
    item("MUS_OBTAIN_TMHM", 192, false),
    item("MUS_PALLET", 5586, true),
    item("MUS_PEWTER", 3932, true),
    item("MUS_PHOTO", 80, false),
    item("MUS_POKE_CENTER", 2119, true),
    item("MUS_POKE_FLUTE", 3264, false),
    item("MUS_POKE_JUMP", 2922, true),
    item("MUS_POKE_MANSION", 7448, true),
    item("MUS_POKE_TOWER", 3783, true),
    item("MUS_RIVAL_EXIT", 1189, true),
    item("MUS_ROCKET_HIDEOUT", 4727, true),
    item("MUS_ROUTE1", 3195, true),
    item("MUS_ROUTE11", 4212, true),
    item("MUS_ROUTE24", 1335, true),
    item("MUS_ROUTE3", 2308, true),
    item("MUS_RS_VS_GYM_LEADER", 4859, true),
    item("MUS_RS_VS_TRAINER", 5741, true),
    item("MUS_SCHOOL", 2384, true),
    item("MUS_SEVII_123", 3932, true),
    item("MUS_SEVII_45", 3344, true),
    item("MUS_SEVII_67", 2781, true),
    item("MUS_SEVII_CAVE", 5894, true),
    item("MUS_SEVII_DUNGEON", 6735, true),
    item("MUS_SEVII_ROUTE", 2385, true),
    item("MUS_SILPH", 3784, true),
    item("MUS_SLOTS_JACKPOT", 240, false),
    item("MUS_SLOTS_WIN", 160, false),
    item("MUS_SLOW_PALLET", 6827, true),
    item("MUS_SS_ANNE", 4582, true),
    item("MUS_SURF", 2074, true),
    item("MUS_TEACHY_TV_MENU", 240, true),
    item("MUS_TEACHY_TV_SHOW", 1053, true),
    item("MUS_TITLE", 2880, true),
    item("MUS_TOO_BAD", 150, false),
    item("MUS_TRAINER_TOWER", 2160, true),
    item("MUS_UNION_ROOM", 3009, true),
    item("MUS_VERMILLION", 2384, true),
    item("MUS_VICTORY_GYM_LEADER", 3061, true),
    item("MUS_VICTORY_ROAD", 3869, true),
    item("MUS_VICTORY_TRAINER", 1036, true),
    item("MUS_VICTORY_WILD", 998, true),
    item("MUS_VIRIDIAN_FOREST", 6735, true),
    item("MUS_VS_CHAMPION", 4734, true),
    item("MUS_VS_DEOXYS", 5213, true),
    item("MUS_VS_GYM_LEADER", 7102, true),
    item("MUS_VS_LEGEND", 2870, true),
    item("MUS_VS_MEWTWO", 2870, true),
    item("MUS_VS_TRAINER", 6520, true),
    item("MUS_VS_WILD", 2870, true),
    item("SE_APPLAUSE", 308, false),
    item("SE_BALL", 8, false),
    item("SE_BALLOON_BLUE", 12, false),
    item("SE_BALLOON_RED", 16, false),
    item("SE_BALLOON_YELLOW", 12, false),
    item("SE_BALL_BOUNCE_1", 13, false),
    item("SE_BALL_BOUNCE_2", 13, false),
    item("SE_BALL_BOUNCE_3", 13, false),
    item("SE_BALL_BOUNCE_4", 13, false),
    item("SE_BALL_OPEN", 27, false),
    item("SE_BALL_THROW", 26, false),
    item("SE_BALL_TRADE", 0, false),
    item("SE_BALL_TRAY_BALL", 7, false),
    item("SE_BALL_TRAY_ENTER", 13, false),
    item("SE_BALL_TRAY_EXIT", 4, false),
    item("SE_BANG", 48, false),
    item("SE_BERRY_BLENDER", 256, true),
    item("SE_BIKE_BELL", 128, false),
    item("SE_BIKE_HOP", 6, false),
    item("SE_BOO", 20, false),
    item("SE_BREAKABLE_DOOR", 20, false),
    item("SE_BRIDGE_WALK", 10, false),
    item("SE_CLICK", 10, false),
    item("SE_CONTEST_CONDITION_LOSE", 10, false),
    item("SE_CONTEST_CURTAIN_FALL", 13, false),
    item("SE_CONTEST_CURTAIN_RISE", 13, false),
    item("SE_CONTEST_HEART", 13, false),
    item("SE_CONTEST_ICON_CHANGE", 7, false),
    item("SE_CONTEST_ICON_CLEAR", 7, false),
    item("SE_CONTEST_MONS_TURN", 26, false),
    item("SE_CONTEST_PLACE", 40, false),
    item("SE_DEX_SEARCH", 80, false),
    item("SE_DING_DONG", 68, false),
    item("SE_DOOR", 35, false),
    item("SE_DOWNPOUR", 44, true),
    item("SE_DOWNPOUR_STOP", 35, false),
    item("SE_EFFECTIVE", 75, false),
    item("SE_EGG_HATCH", 26, false),
    item("SE_ELEVATOR", 231, false),
    item("SE_ESCALATOR", 128, false),
    item("SE_EXIT", 40, false),
    item("SE_EXP", 104, false),
    item("SE_EXP_MAX", 20, false),
    item("SE_FAILURE", 22, false),
    item("SE_FAINT", 54, false),
    item("SE_FALL", 46, false),
    item("SE_FIELD_POISON", 26, false),
    item("SE_FLEE", 42, false),
    item("SE_FU_ZAKU", 26, false),
    item("SE_GLASS_FLUTE", 24, false),
    item("SE_ICE_BREAK", 20, false),
    item("SE_ICE_CRACK", 10, false),
    item("SE_ICE_STAIRS", 20, false),
    item("SE_INTRO_BLAST", 192, false),
    item("SE_ITEMFINDER", 38, false),
    item("SE_LAVARIDGE_FALL_WARP", 72, false),
    item("SE_LEDGE", 12, false),
    item("SE_LOW_HEALTH", 39, true),
    item("SE_MUD_BALL", 10, false),
    item("SE_MUGSHOT", 158, false),
    item("SE_M_BIND", 26, false),
    item("SE_M_COMET_PUNCH", 26, false),
    item("SE_M_CUT", 35, false),
    item("SE_M_DOUBLE_SLAP", 26, false),
    item("SE_M_FIRE_PUNCH", 53, false),
    item("SE_M_FLY", 35, false),
    item("SE_M_GUST", 77, true),
    item("SE_M_GUST2", 52, false),
    item("SE_M_HEADBUTT", 26, false),
    item("SE_M_HORN_ATTACK", 26, false),
    item("SE_M_JUMP_KICK", 22, false),
    item("SE_M_LEER", 64, false),
    item("SE_M_MEGA_KICK", 77, false),
    item("SE_M_MEGA_KICK2", 35, false),
    item("SE_M_PAY_DAY", 39, false),
    item("SE_M_RAZOR_WIND", 35, false),
    item("SE_M_RAZOR_WIND2", 16, false),
    item("SE_M_SAND_ATTACK", 26, false),
    item("SE_M_SCRATCH", 18, false),
    item("SE_M_SWORDS_DANCE", 64, false),
    item("SE_M_TAIL_WHIP", 26, false),
    item("SE_M_TAKE_DOWN", 52, false),
    item("SE_M_VICEGRIP", 18, false),
    item("SE_M_WING_ATTACK", 18, false),
    item("SE_NOTE_A", 20, false),
    item("SE_NOTE_B", 20, false),
    item("SE_NOTE_C", 20, false),
    item("SE_NOTE_C_HIGH", 20, false),
    item("SE_NOTE_D", 20, false),
    item("SE_NOTE_E", 20, false),
    item("SE_NOTE_F", 20, false),
    item("SE_NOTE_G", 20, false),
    item("SE_NOT_EFFECTIVE", 16, false),
    item("SE_ORB", 236, false),
    item("SE_PC_LOGIN", 27, false),
    item("SE_PC_OFF", 24, false),
    item("SE_PC_ON", 64, false),
    item("SE_PIN", 24, false),
    item("SE_POKENAV_OFF", 20, false),
    item("SE_POKENAV_ON", 20, false),
    item("SE_PUDDLE", 13, false),
    item("SE_RAIN", 62, true),
    item("SE_RAIN_STOP", 35, false),
    item("SE_REPEL", 27, false),
    item("SE_ROTATING_GATE", 22, false),
    item("SE_ROULETTE_BALL", 512, false),
    item("SE_ROULETTE_BALL2", 77, false),
    item("SE_RS_DOOR", 35, false),
    item("SE_RS_SHOP", 30, false),
    item("SE_SAVE", 45, false),
    item("SE_SELECT", 10, false),
    item("SE_SHINY", 35, false),
    item("SE_SHIP", 123, false),
    item("SE_SLIDING_DOOR", 16, false),
    item("SE_SUCCESS", 16, false),
    item("SE_SUPER_EFFECTIVE", 91, false),
    item("SE_SWITCH", 10, false),
    item("SE_TAILLOW_WING_FLAP", 35, true),
    item("SE_THUNDER", 105, false),
    item("SE_THUNDER2", 88, false),
    item("SE_THUNDERSTORM", 62, true),
    item("SE_THUNDERSTORM_STOP", 35, false),
    item("SE_TRUCK_DOOR", 13, false),
    item("SE_TRUCK_MOVE", 410, true),
    item("SE_TRUCK_STOP", 154, false),
    item("SE_TRUCK_UNLOAD", 29, false),
    item("SE_UNLOCK", 26, false),
    item("SE_USE_ITEM", 30, false),
    item("SE_VEND", 13, false),
    item("SE_WARP_IN", 48, false),
    item("SE_WARP_OUT", 53, false),
    item("SE_BAG_CURSOR", 5, false),
    item("SE_BAG_POCKET", 3, false),
    item("SE_BALL_CLICK", 11, false),
    item("SE_CARD_FLIP", 43, false),
    item("SE_CARD_FLIPPING", 106, false),
    item("SE_CARD_OPEN", 111, false),
    item("SE_DEOXYS_MOVE", 118, false),
    item("SE_DEX_PAGE", 15, false),
    item("SE_DEX_SCROLL", 5, false),
    item("SE_HELP_CLOSE", 37, false),
    item("SE_HELP_ERROR", 19, false),
    item("SE_HELP_OPEN", 37, false),
    item("SE_M_ABSORB", 13, false),
    item("SE_M_ABSORB_2", 55, false),
    item("SE_M_ACID_ARMOR", 77, false),
    item("SE_M_ATTRACT", 53, false),
    item("SE_M_ATTRACT2", 231, false),
    item("SE_M_BARRIER", 58, false),
    item("SE_M_BATON_PASS", 0, false),
    item("SE_M_BELLY_DRUM", 26, false),
    item("SE_M_BITE", 18, false),
    item("SE_M_BLIZZARD", 77, true),
    item("SE_M_BLIZZARD2", 52, false),
    item("SE_M_BONEMERANG", 13, false),
    item("SE_M_BRICK_BREAK", 39, false),
    item("SE_M_BUBBLE", 18, false),
    item("SE_M_BUBBLE2", 18, false),
    item("SE_M_BUBBLE3", 18, false),
    item("SE_M_BUBBLE_BEAM", 84, false),
    item("SE_M_BUBBLE_BEAM2", 39, false),
    item("SE_M_CHARGE", 77, false),
    item("SE_M_CHARM", 20, false),
    item("SE_M_CONFUSE_RAY", 35, false),
    item("SE_M_COSMIC_POWER", 212, false),
    item("SE_M_CRABHAMMER", 26, false),
    item("SE_M_DETECT", 31, false),
    item("SE_M_DIG", 16, false),
    item("SE_M_DIVE", 52, false),
    item("SE_M_DIZZY_PUNCH", 26, false),
    item("SE_M_DOUBLE_TEAM", 26, false),
    item("SE_M_DRAGON_RAGE", 103, false),
    item("SE_M_EARTHQUAKE", 218, false),
    item("SE_M_EMBER", 26, false),
    item("SE_M_ENCORE", 13, false),
    item("SE_M_ENCORE2", 154, false),
    item("SE_M_EXPLOSION", 77, false),
    item("SE_M_FAINT_ATTACK", 32, false),
    item("SE_M_FLAMETHROWER", 205, false),
    item("SE_M_FLAME_WHEEL", 36, false),
    item("SE_M_FLAME_WHEEL2", 52, false),
    item("SE_M_FLATTER", 13, false),
    item("SE_M_GIGA_DRAIN", 26, false),
    item("SE_M_GRASSWHISTLE", 212, false),
    item("SE_M_HAIL", 32, false),
    item("SE_M_HARDEN", 26, false),
    item("SE_M_HAZE", 177, false),
    item("SE_M_HEAL_BELL", 26, false),
    item("SE_M_HEAT_WAVE", 141, false),
    item("SE_M_HYDRO_PUMP", 128, false),
    item("SE_M_HYPER_BEAM", 26, false),
    item("SE_M_HYPER_BEAM2", 26, false),
    item("SE_M_ICY_WIND", 13, false),
    item("SE_M_LICK", 39, false),
    item("SE_M_LOCK_ON", 20, false),
    item("SE_M_METRONOME", 26, false),
    item("SE_M_MILK_DRINK", 27, false),
    item("SE_M_MINIMIZE", 58, false),
    item("SE_M_MIST", 26, false),
    item("SE_M_MOONLIGHT", 308, false),
    item("SE_M_MORNING_SUN", 80, false),
    item("SE_M_NIGHTMARE", 70, false),
    item("SE_M_PERISH_SONG", 202, false),
    item("SE_M_PETAL_DANCE", 144, false),
    item("SE_M_POISON_POWDER", 26, false),
    item("SE_M_PSYBEAM", 36, false),
    item("SE_M_PSYBEAM2", 51, false),
    item("SE_M_RAIN_DANCE", 123, false),
    item("SE_M_REFLECT", 58, false),
    item("SE_M_REVERSAL", 71, false),
    item("SE_M_ROCK_THROW", 52, false),
    item("SE_M_SACRED_FIRE", 26, false),
    item("SE_M_SACRED_FIRE2", 103, false),
    item("SE_M_SANDSTORM", 154, false),
    item("SE_M_SAND_TOMB", 103, false),
    item("SE_M_SCREECH", 26, false),
    item("SE_M_SELF_DESTRUCT", 52, false),
    item("SE_M_SING", 279, false),
    item("SE_M_SKETCH", 11, false),
    item("SE_M_SKY_UPPERCUT", 27, false),
    item("SE_M_SNORE", 22, false),
    item("SE_M_SOLAR_BEAM", 205, false),
    item("SE_M_SPIT_UP", 16, false),
    item("SE_M_STAT_DECREASE", 74, false),
    item("SE_M_STAT_INCREASE", 74, false),
    item("SE_M_STRENGTH", 26, false),
    item("SE_M_STRING_SHOT", 31, false),
    item("SE_M_STRING_SHOT2", 62, false),
    item("SE_M_SUPERSONIC", 45, false),
    item("SE_M_SURF", 103, false),
    item("SE_M_SWAGGER", 16, false),
    item("SE_M_SWAGGER2", 13, false),
    item("SE_M_SWEET_SCENT", 180, false),
    item("SE_M_SWIFT", 16, false),
    item("SE_M_TEETER_DANCE", 57, false),
    item("SE_M_TELEPORT", 58, false),
    item("SE_M_THUNDERBOLT", 35, false),
    item("SE_M_THUNDERBOLT2", 35, false),
    item("SE_M_THUNDER_WAVE", 52, false),
    item("SE_M_TOXIC", 26, false),
    item("SE_M_TRI_ATTACK", 18, false),
    item("SE_M_TRI_ATTACK2", 70, false),
    item("SE_M_TWISTER", 180, false),
    item("SE_M_UPROAR", 26, false),
    item("SE_M_VITAL_THROW", 18, false),
    item("SE_M_VITAL_THROW2", 18, false),
    item("SE_M_WATERFALL", 64, false),
    item("SE_M_WHIRLPOOL", 128, false),
    item("SE_M_YAWN", 52, false),
    item("SE_POKE_JUMP_FAILURE", 22, false),
    item("SE_POKE_JUMP_SUCCESS", 55, false),
    item("SE_SHOP", 39, false),
    item("SE_SS_ANNE_HORN", 235, false),
    item("SE_WALL_HIT", 18, false),
    item("SE_WIN_OPEN", 18, false),
];

/// Index of the first sound effect; everything before it is music.
pub const FIRST_SOUND_EFFECT: u16 = 92;
