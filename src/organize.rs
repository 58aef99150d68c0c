use {
    crate::{define_cell, util::*, QuestionArgs, RunQuestions},
    bitvec::prelude::*,
    nom::{
        branch::alt,
        bytes::complete::tag,
        character::complete::line_ending,
        combinator::{map, map_opt, opt},
        error::{Error, ErrorKind},
        multi::many_m_n,
        sequence::{delimited, terminated, tuple},
        Err, IResult,
    },
    static_assertions::const_assert,
    std::collections::{HashMap, VecDeque},
    strum::{EnumCount, IntoEnumIterator},
    strum_macros::{EnumCount as EnumCountMacro, EnumIter},
};

/// Number of cells in the hallway.
pub const HALLWAY_LEN: usize = 11_usize;

/// One side room per amphipod kind.
const SIDE_ROOMS: usize = Amphipod::COUNT;

// Every side-room entrance sits strictly inside the hallway.
const_assert!(2_usize + 2_usize * (SIDE_ROOMS - 1_usize) < HALLWAY_LEN);

/// Hallway index directly above side room `room`.
const fn room_entrance(room: usize) -> usize {
    2_usize + 2_usize * room
}

/// Amphipods may pass over entrance-aligned hallway cells but never stop on them.
const fn is_stop_cell(hallway_index: usize) -> bool {
    hallway_index < room_entrance(0_usize)
        || hallway_index > room_entrance(SIDE_ROOMS - 1_usize)
        || hallway_index % 2_usize != 0_usize
}

/// One mobile unit kind. The discriminant is simultaneously the home side-room index and the
/// exponent of the per-step energy cost.
#[derive(Clone, Copy, Debug, EnumCountMacro, EnumIter, Eq, PartialEq)]
pub enum Amphipod {
    Amber,
    Bronze,
    Copper,
    Desert,
}

impl Amphipod {
    #[inline(always)]
    const fn energy_per_step(self) -> u32 {
        10_u32.pow(self as u32)
    }

    const fn home_room(self) -> usize {
        self as usize
    }

    const fn entrance(self) -> usize {
        room_entrance(self.home_room())
    }
}

define_cell! {
    #[repr(u8)]
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    pub enum Cell {
        Void = VOID = b' ',
        Wall = WALL = b'#',
        Vacant = VACANT = b'.',
        Amber = AMBER = b'A',
        Bronze = BRONZE = b'B',
        Copper = COPPER = b'C',
        Desert = DESERT = b'D',
    }
}

impl Cell {
    fn amphipod(self) -> Option<Amphipod> {
        match self {
            Self::Void | Self::Wall | Self::Vacant => None,
            Self::Amber => Some(Amphipod::Amber),
            Self::Bronze => Some(Amphipod::Bronze),
            Self::Copper => Some(Amphipod::Copper),
            Self::Desert => Some(Amphipod::Desert),
        }
    }

    /// A hallway or side-room cell, as opposed to part of the burrow frame.
    fn is_open(self) -> bool {
        !matches!(self, Self::Void | Self::Wall)
    }
}

impl From<Amphipod> for Cell {
    fn from(amphipod: Amphipod) -> Self {
        home_cell(amphipod.home_room())
    }
}

const fn home_cell(room: usize) -> Cell {
    match room {
        0_usize => Cell::Amber,
        1_usize => Cell::Bronze,
        2_usize => Cell::Copper,
        3_usize => Cell::Desert,
        _ => panic!("no side room beyond the amphipod kinds"),
    }
}

type HallwayBitArray = BitArr!(for HALLWAY_LEN, in u16);

/// Cells are stored exactly as the canonical key orders them: hallway cells by index, then each
/// side room top to bottom. `Eq`/`Hash` over this layout is the vertex identity of the search
/// graph; amphipods of one kind are interchangeable, so no further normalization is needed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct BurrowState<const SIDE_ROOM_LEN: usize> {
    hallway: [Cell; HALLWAY_LEN],
    side_rooms: [[Cell; SIDE_ROOM_LEN]; SIDE_ROOMS],
}

impl<const SIDE_ROOM_LEN: usize> BurrowState<SIDE_ROOM_LEN> {
    const EMPTY: Self = Self {
        hallway: [Cell::Vacant; HALLWAY_LEN],
        side_rooms: [[Cell::Vacant; SIDE_ROOM_LEN]; SIDE_ROOMS],
    };
    const ORGANIZED: Self = Self::organized();
    const KEY_LEN: usize = HALLWAY_LEN + 1_usize + SIDE_ROOMS * SIDE_ROOM_LEN;
    const KEY_SEPARATOR: u8 = b'|';

    const fn organized() -> Self {
        let mut organized: Self = Self::EMPTY;
        let mut room: usize = 0_usize;

        while room < SIDE_ROOMS {
            let mut depth: usize = 0_usize;

            while depth < SIDE_ROOM_LEN {
                organized.side_rooms[room][depth] = home_cell(room);
                depth += 1_usize;
            }

            room += 1_usize;
        }

        organized
    }

    /// Once every room cell holds its home kind, the hallway is necessarily empty, so only the
    /// room portion needs checking.
    fn is_organized(&self) -> bool {
        self.side_rooms == Self::ORGANIZED.side_rooms
    }

    /// Canonical state key: hallway cells in index order, a separator, then every side-room cell,
    /// room by room, top to bottom within each room.
    pub fn encode(&self) -> String {
        let mut key: String = String::with_capacity(Self::KEY_LEN);

        for cell in self.hallway {
            key.push(cell as u8 as char);
        }

        key.push(Self::KEY_SEPARATOR as char);

        for cell in self.side_rooms.into_iter().flatten() {
            key.push(cell as u8 as char);
        }

        key
    }

    /// Inverse of `encode`. Rejects keys of the wrong shape or containing symbols that aren't
    /// open-cell symbols.
    pub fn try_decode(key: &str) -> Option<Self> {
        let bytes: &[u8] = key.as_bytes();

        (bytes.len() == Self::KEY_LEN && bytes[HALLWAY_LEN] == Self::KEY_SEPARATOR)
            .then_some(())?;

        let open_cell = |byte: u8| -> Option<Cell> {
            Cell::try_from(byte).ok().filter(|cell| cell.is_open())
        };
        let mut state: Self = Self::EMPTY;

        for (hallway_cell, byte) in state
            .hallway
            .iter_mut()
            .zip(bytes[..HALLWAY_LEN].iter().copied())
        {
            *hallway_cell = open_cell(byte)?;
        }

        for (room_cell, byte) in state
            .side_rooms
            .iter_mut()
            .flat_map(|side_room| side_room.iter_mut())
            .zip(bytes[HALLWAY_LEN + 1_usize..].iter().copied())
        {
            *room_cell = open_cell(byte)?;
        }

        Some(state)
    }

    fn population(&self, amphipod: Amphipod) -> usize {
        let cell: Cell = amphipod.into();

        self.hallway
            .iter()
            .chain(self.side_rooms.iter().flatten())
            .filter(|&&layout_cell| layout_cell == cell)
            .count()
    }

    /// Amphipods are conserved: every kind fills exactly one side room.
    fn is_population_valid(&self) -> bool {
        Amphipod::iter().all(|amphipod| self.population(amphipod) == SIDE_ROOM_LEN)
    }

    fn hallway_occupancy(&self) -> HallwayBitArray {
        let mut occupancy: HallwayBitArray = BitArray::ZERO;

        for (hallway_index, cell) in self.hallway.iter().enumerate() {
            occupancy.set(hallway_index, cell.amphipod().is_some());
        }

        occupancy
    }

    /// Whether every hallway cell strictly between `from` and `to` is vacant.
    fn is_hallway_clear(occupancy: &HallwayBitArray, from: usize, to: usize) -> bool {
        let (lower, upper): (usize, usize) = if from < to { (from, to) } else { (to, from) };

        !occupancy[lower + 1_usize..upper].any()
    }

    /// Deepest vacant cell of `amphipod`'s home room, if the room holds no foreign kind.
    fn home_room_vacancy(&self, amphipod: Amphipod) -> Option<usize> {
        let home_cell: Cell = amphipod.into();
        let side_room: &[Cell; SIDE_ROOM_LEN] = &self.side_rooms[amphipod.home_room()];

        side_room
            .iter()
            .all(|&cell| cell == Cell::Vacant || cell == home_cell)
            .then(|| side_room.iter().rposition(|&cell| cell == Cell::Vacant))
            .flatten()
    }

    /// Whether side room `room` needs no extraction: from `depth` downward it holds only its home
    /// kind.
    fn is_settled_from(&self, room: usize, depth: usize) -> bool {
        let home_cell: Cell = home_cell(room);

        self.side_rooms[room][depth..]
            .iter()
            .all(|&cell| cell == home_cell)
    }

    fn push_room_entry_moves(&self, moves: &mut Vec<OpenSetElement<Self, u32>>) {
        let occupancy: HallwayBitArray = self.hallway_occupancy();

        for (hallway_index, amphipod) in self
            .hallway
            .iter()
            .enumerate()
            .filter_map(|(hallway_index, cell)| {
                cell.amphipod().map(|amphipod| (hallway_index, amphipod))
            })
        {
            let entrance: usize = amphipod.entrance();

            if !Self::is_hallway_clear(&occupancy, hallway_index, entrance) {
                continue;
            }

            if let Some(depth) = self.home_room_vacancy(amphipod) {
                let steps: u32 = (hallway_index.abs_diff(entrance) + depth + 1_usize) as u32;
                let mut next: Self = *self;

                next.hallway[hallway_index] = Cell::Vacant;
                next.side_rooms[amphipod.home_room()][depth] = amphipod.into();
                moves.push(OpenSetElement(next, steps * amphipod.energy_per_step()));
            }
        }
    }

    fn push_room_exit_moves(&self, moves: &mut Vec<OpenSetElement<Self, u32>>) {
        for room in 0_usize..SIDE_ROOMS {
            if let Some((depth, amphipod)) = self.side_rooms[room]
                .iter()
                .enumerate()
                .find_map(|(depth, cell)| cell.amphipod().map(|amphipod| (depth, amphipod)))
            {
                if amphipod.home_room() == room && self.is_settled_from(room, depth) {
                    continue;
                }

                let entrance: usize = room_entrance(room);
                let mut push_move = |hallway_index: usize| {
                    let steps: u32 = (depth + 1_usize + entrance.abs_diff(hallway_index)) as u32;
                    let mut next: Self = *self;

                    next.side_rooms[room][depth] = Cell::Vacant;
                    next.hallway[hallway_index] = amphipod.into();
                    moves.push(OpenSetElement(next, steps * amphipod.energy_per_step()));
                };

                for hallway_index in (0_usize..entrance).rev() {
                    if self.hallway[hallway_index].amphipod().is_some() {
                        break;
                    }

                    if is_stop_cell(hallway_index) {
                        push_move(hallway_index);
                    }
                }

                for hallway_index in entrance + 1_usize..HALLWAY_LEN {
                    if self.hallway[hallway_index].amphipod().is_some() {
                        break;
                    }

                    if is_stop_cell(hallway_index) {
                        push_move(hallway_index);
                    }
                }
            }
        }
    }

    /// All legal relocations from this state, paired with their exact energy cost.
    ///
    /// Whenever any hallway-to-room move is legal, only hallway-to-room moves are emitted: sending
    /// an amphipod home early is never harmful to the optimal cost, so exploring extractions
    /// alongside is redundant and would only widen the branching factor.
    fn push_moves(&self, moves: &mut Vec<OpenSetElement<Self, u32>>) {
        moves.clear();
        self.push_room_entry_moves(moves);

        if moves.is_empty() {
            self.push_room_exit_moves(moves);
        }
    }

    /// Admissible lower bound on the remaining energy: each misplaced amphipod pays its unblocked
    /// walking distance home, ignoring every interaction with other amphipods. Amphipods already
    /// in their home room contribute zero even when foreign kinds sit below them, which undercounts
    /// but never overcounts.
    fn heuristic(&self) -> u32 {
        let hallway_energy: u32 = self
            .hallway
            .iter()
            .enumerate()
            .filter_map(|(hallway_index, cell)| {
                cell.amphipod().map(|amphipod| {
                    (hallway_index.abs_diff(amphipod.entrance()) + 1_usize) as u32
                        * amphipod.energy_per_step()
                })
            })
            .sum();
        let side_room_energy: u32 = self
            .side_rooms
            .iter()
            .enumerate()
            .flat_map(|(room, side_room)| {
                side_room.iter().enumerate().filter_map(move |(depth, cell)| {
                    cell.amphipod()
                        .filter(|amphipod| amphipod.home_room() != room)
                        .map(|amphipod| {
                            (room_entrance(room).abs_diff(amphipod.entrance()) + depth + 2_usize)
                                as u32
                                * amphipod.energy_per_step()
                        })
                })
            })
            .sum();

        hallway_energy + side_room_energy
    }

    fn as_string(&self) -> String {
        let width: usize = HALLWAY_LEN + 2_usize;
        let mut string: String = String::with_capacity((width + 1_usize) * (SIDE_ROOM_LEN + 3_usize));

        for _ in 0_usize..width {
            string.push(Cell::Wall as u8 as char);
        }

        string.push('\n');
        string.push(Cell::Wall as u8 as char);

        for cell in self.hallway {
            string.push(cell as u8 as char);
        }

        string.push(Cell::Wall as u8 as char);
        string.push('\n');

        for depth in 0_usize..SIDE_ROOM_LEN {
            let (prefix, suffix): (&str, &str) = if depth == 0_usize {
                ("###", "##")
            } else {
                ("  #", "")
            };

            string.push_str(prefix);

            for room in 0_usize..SIDE_ROOMS {
                string.push(self.side_rooms[room][depth] as u8 as char);
                string.push(Cell::Wall as u8 as char);
            }

            string.push_str(suffix);
            string.push('\n');
        }

        string.push_str("  ");

        for _ in 0_usize..2_usize * SIDE_ROOMS + 1_usize {
            string.push(Cell::Wall as u8 as char);
        }

        string.push('\n');

        string
    }

    fn try_organize(self) -> Option<(Vec<Self>, u32)> {
        self.try_organize_with_tie_break(TieBreak::default())
    }

    fn try_organize_with_tie_break(self, tie_break: TieBreak) -> Option<(Vec<Self>, u32)> {
        let mut result: OrganizeResult<SIDE_ROOM_LEN> = Default::default();
        let path: Option<Vec<Self>> = Organize {
            start: self,
            result: &mut result,
        }
        .run_a_star_with_tie_break(tie_break);

        path.and_then(|path| result.energy_to_organize().map(|energy| (path, energy)))
    }

    #[allow(dead_code)]
    fn try_organize_dijkstra(self) -> Option<(Vec<Self>, u32)> {
        let mut result: OrganizeResult<SIDE_ROOM_LEN> = Default::default();
        let path: Option<Vec<Self>> = Organize {
            start: self,
            result: &mut result,
        }
        .run_dijkstra();

        path.and_then(|path| result.energy_to_organize().map(|energy| (path, energy)))
    }
}

impl<const SIDE_ROOM_LEN: usize> Default for BurrowState<SIDE_ROOM_LEN> {
    fn default() -> Self {
        Self::EMPTY
    }
}

fn parse_open_cell(input: &str) -> IResult<&str, Cell> {
    map_opt(Cell::parse, |cell| cell.is_open().then_some(cell))(input)
}

impl<const SIDE_ROOM_LEN: usize> Parse for BurrowState<SIDE_ROOM_LEN> {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        let (input, _) = terminated(tag("#############"), line_ending)(input)?;
        let (input, hallway_cells) = delimited(
            tag("#"),
            many_m_n(HALLWAY_LEN, HALLWAY_LEN, parse_open_cell),
            tuple((tag("#"), line_ending)),
        )(input)?;
        let (input, side_room_rows) = many_m_n(
            SIDE_ROOM_LEN,
            SIDE_ROOM_LEN,
            delimited(
                alt((tag("###"), tag("  #"))),
                many_m_n(SIDE_ROOMS, SIDE_ROOMS, terminated(parse_open_cell, tag("#"))),
                tuple((opt(tag("##")), line_ending)),
            ),
        )(input)?;
        let (input, _) = terminated(tag("  #########"), opt(line_ending))(input)?;

        let mut state: Self = Self::EMPTY;

        for (hallway_cell, cell) in state.hallway.iter_mut().zip(hallway_cells) {
            *hallway_cell = cell;
        }

        for (depth, side_room_row) in side_room_rows.into_iter().enumerate() {
            for (room, cell) in side_room_row.into_iter().enumerate() {
                state.side_rooms[room][depth] = cell;
            }
        }

        if state.is_population_valid() {
            Ok((input, state))
        } else {
            Err(Err::Error(Error::new(input, ErrorKind::Verify)))
        }
    }
}

type SmallBurrowState = BurrowState<2_usize>;
type LargeBurrowState = BurrowState<4_usize>;

impl From<SmallBurrowState> for LargeBurrowState {
    /// Unfolds the diagram: the two folded side-room rows slide in between the two parsed rows.
    fn from(small: SmallBurrowState) -> Self {
        const INSERTED_ROWS: [[Amphipod; SIDE_ROOMS]; 2_usize] = [
            [
                Amphipod::Desert,
                Amphipod::Copper,
                Amphipod::Bronze,
                Amphipod::Amber,
            ],
            [
                Amphipod::Desert,
                Amphipod::Bronze,
                Amphipod::Amber,
                Amphipod::Copper,
            ],
        ];

        let mut large: Self = Self::EMPTY;

        large.hallway = small.hallway;

        for room in 0_usize..SIDE_ROOMS {
            large.side_rooms[room][0_usize] = small.side_rooms[room][0_usize];
            large.side_rooms[room][1_usize] = INSERTED_ROWS[0_usize][room].into();
            large.side_rooms[room][2_usize] = INSERTED_ROWS[1_usize][room].into();
            large.side_rooms[room][3_usize] = small.side_rooms[room][1_usize];
        }

        large
    }
}

struct PreviousEntry<const SIDE_ROOM_LEN: usize> {
    previous: Option<BurrowState<SIDE_ROOM_LEN>>,
    energy: u32,
}

/// The best-cost table: for every visited state, the cheapest accumulated energy found so far and
/// the state it was reached from. Entries only ever have their energy decreased.
#[derive(Default)]
struct OrganizeResult<const SIDE_ROOM_LEN: usize> {
    best_cost_map: HashMap<BurrowState<SIDE_ROOM_LEN>, PreviousEntry<SIDE_ROOM_LEN>>,
}

impl<const SIDE_ROOM_LEN: usize> OrganizeResult<SIDE_ROOM_LEN> {
    fn energy_to_organize(&self) -> Option<u32> {
        self.best_cost_map
            .get(&BurrowState::<SIDE_ROOM_LEN>::ORGANIZED)
            .map(|previous_entry| previous_entry.energy)
    }

    fn path(&self) -> Vec<BurrowState<SIDE_ROOM_LEN>> {
        let mut path: VecDeque<BurrowState<SIDE_ROOM_LEN>> = VecDeque::new();
        let mut vertex: BurrowState<SIDE_ROOM_LEN> = BurrowState::ORGANIZED;

        while let Some(previous_entry) = self.best_cost_map.get(&vertex) {
            path.push_front(vertex);

            match previous_entry.previous {
                Some(previous) => vertex = previous,
                None => break,
            }
        }

        path.into()
    }
}

struct Organize<'r, const SIDE_ROOM_LEN: usize> {
    start: BurrowState<SIDE_ROOM_LEN>,
    result: &'r mut OrganizeResult<SIDE_ROOM_LEN>,
}

impl<'r, const SIDE_ROOM_LEN: usize> WeightedGraphSearch for Organize<'r, SIDE_ROOM_LEN> {
    type Vertex = BurrowState<SIDE_ROOM_LEN>;
    type Cost = u32;

    fn start(&self) -> &Self::Vertex {
        &self.start
    }

    fn is_end(&self, vertex: &Self::Vertex) -> bool {
        vertex.is_organized()
    }

    fn path_to(&self, vertex: &Self::Vertex) -> Vec<Self::Vertex> {
        assert!(self.is_end(vertex));

        self.result.path()
    }

    fn cost_from_start(&self, vertex: &Self::Vertex) -> Self::Cost {
        self.result
            .best_cost_map
            .get(vertex)
            .map_or(u32::MAX, |previous_entry| previous_entry.energy)
    }

    fn heuristic(&self, vertex: &Self::Vertex) -> Self::Cost {
        vertex.heuristic()
    }

    fn neighbors(
        &self,
        vertex: &Self::Vertex,
        neighbors: &mut Vec<OpenSetElement<Self::Vertex, Self::Cost>>,
    ) {
        vertex.push_moves(neighbors);
    }

    fn update_vertex(
        &mut self,
        from: &Self::Vertex,
        to: &Self::Vertex,
        cost: Self::Cost,
        _heuristic: Self::Cost,
    ) {
        self.result.best_cost_map.insert(
            *to,
            PreviousEntry {
                previous: Some(*from),
                energy: cost,
            },
        );
    }

    fn reset(&mut self) {
        self.result.best_cost_map.clear();
        self.result.best_cost_map.insert(
            self.start,
            PreviousEntry {
                previous: None,
                energy: 0_u32,
            },
        );
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution(SmallBurrowState);

impl Solution {
    fn try_organize(&self) -> Option<(Vec<SmallBurrowState>, u32)> {
        self.0.try_organize()
    }

    fn try_min_energy(&self) -> Option<u32> {
        self.try_organize().map(|(_, energy)| energy)
    }

    fn try_organize_unfolded(&self) -> Option<(Vec<LargeBurrowState>, u32)> {
        LargeBurrowState::from(self.0).try_organize()
    }

    fn try_min_energy_unfolded(&self) -> Option<u32> {
        self.try_organize_unfolded().map(|(_, energy)| energy)
    }
}

impl Parse for Solution {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(SmallBurrowState::parse, Self)(input)
    }
}

impl RunQuestions for Solution {
    /// Minimum energy to organize the burrow as parsed.
    fn q1_internal(&mut self, args: &QuestionArgs) {
        if args.verbose {
            if let Some((path, energy)) = self.try_organize() {
                dbg!(energy);

                for (index, state) in path.into_iter().enumerate() {
                    println!("State {index}:\n{}", state.as_string());
                }
            } else {
                println!("self.try_organize().is_none()");
            }
        } else {
            dbg!(self.try_min_energy());
        }
    }

    /// Minimum energy once the two folded side-room rows are revealed.
    fn q2_internal(&mut self, args: &QuestionArgs) {
        if args.verbose {
            if let Some((path, energy)) = self.try_organize_unfolded() {
                dbg!(energy);

                for (index, state) in path.into_iter().enumerate() {
                    println!("State {index}:\n{}", state.as_string());
                }
            } else {
                println!("self.try_organize_unfolded().is_none()");
            }
        } else {
            dbg!(self.try_min_energy_unfolded());
        }
    }
}

impl<'i> TryFrom<&'i str> for Solution {
    type Error = Err<Error<&'i str>>;

    fn try_from(input: &'i str) -> Result<Self, Self::Error> {
        Ok(Self::parse(input)?.1)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::sync::OnceLock};

    const SMALL_BURROW_STATE_STRS: &[&str] = &[
        concat!(
            "#############\n",
            "#...........#\n",
            "###B#C#B#D###\n",
            "  #A#D#C#A#\n",
            "  #########\n",
        ),
        concat!(
            "#############\n",
            "#...B.......#\n",
            "###B#C#.#D###\n",
            "  #A#D#C#A#\n",
            "  #########\n",
        ),
        concat!(
            "#############\n",
            "#...B.......#\n",
            "###B#.#C#D###\n",
            "  #A#D#C#A#\n",
            "  #########\n",
        ),
        concat!(
            "#############\n",
            "#...B.D.....#\n",
            "###B#.#C#D###\n",
            "  #A#.#C#A#\n",
            "  #########\n",
        ),
        concat!(
            "#############\n",
            "#.....D.....#\n",
            "###B#.#C#D###\n",
            "  #A#B#C#A#\n",
            "  #########\n",
        ),
        concat!(
            "#############\n",
            "#.....D.....#\n",
            "###.#B#C#D###\n",
            "  #A#B#C#A#\n",
            "  #########\n",
        ),
        concat!(
            "#############\n",
            "#.....D.D...#\n",
            "###.#B#C#.###\n",
            "  #A#B#C#A#\n",
            "  #########\n",
        ),
        concat!(
            "#############\n",
            "#.....D.D.A.#\n",
            "###.#B#C#.###\n",
            "  #A#B#C#.#\n",
            "  #########\n",
        ),
        concat!(
            "#############\n",
            "#.....D...A.#\n",
            "###.#B#C#.###\n",
            "  #A#B#C#D#\n",
            "  #########\n",
        ),
        concat!(
            "#############\n",
            "#.........A.#\n",
            "###.#B#C#D###\n",
            "  #A#B#C#D#\n",
            "  #########\n",
        ),
        concat!(
            "#############\n",
            "#...........#\n",
            "###A#B#C#D###\n",
            "  #A#B#C#D#\n",
            "  #########\n",
        ),
    ];

    const EXAMPLE_MIN_ENERGY: u32 = 12521_u32;
    const EXAMPLE_MIN_ENERGY_UNFOLDED: u32 = 44169_u32;

    fn small_burrow_state(index: usize) -> SmallBurrowState {
        static ONCE_LOCK: OnceLock<Vec<SmallBurrowState>> = OnceLock::new();

        ONCE_LOCK.get_or_init(|| {
            SMALL_BURROW_STATE_STRS
                .iter()
                .copied()
                .map(|state_str| BurrowState::parse(state_str).unwrap().1)
                .collect()
        })[index]
    }

    fn moves<const SIDE_ROOM_LEN: usize>(
        state: &BurrowState<SIDE_ROOM_LEN>,
    ) -> Vec<OpenSetElement<BurrowState<SIDE_ROOM_LEN>, u32>> {
        let mut moves: Vec<OpenSetElement<BurrowState<SIDE_ROOM_LEN>, u32>> = Vec::new();

        state.push_moves(&mut moves);

        moves
    }

    #[test]
    fn test_burrow_state_parse() {
        assert_eq!(
            small_burrow_state(0_usize).encode(),
            "...........|BACDBCDA"
        );
        assert_eq!(
            small_burrow_state(3_usize).encode(),
            "...B.D.....|BA..CCDA"
        );
    }

    #[test]
    fn test_burrow_state_parse_rejects_bad_population() {
        // Five As and three Bs.
        assert!(BurrowState::<2_usize>::parse(concat!(
            "#############\n",
            "#...........#\n",
            "###A#C#B#D###\n",
            "  #A#D#C#A#\n",
            "  #########\n",
        ))
        .is_err());
    }

    #[test]
    fn test_encode_round_trip() {
        for index in 0_usize..SMALL_BURROW_STATE_STRS.len() {
            let state: SmallBurrowState = small_burrow_state(index);

            assert_eq!(SmallBurrowState::try_decode(&state.encode()), Some(state));
        }

        for OpenSetElement(state, _) in moves(&small_burrow_state(0_usize)) {
            assert_eq!(SmallBurrowState::try_decode(&state.encode()), Some(state));
        }
    }

    #[test]
    fn test_try_decode_rejects_malformed_keys() {
        // Wrong length
        assert_eq!(SmallBurrowState::try_decode("...........|BACDBCD"), None);

        // Separator out of place
        assert_eq!(SmallBurrowState::try_decode("..........|.BACDBCDA"), None);

        // Frame symbol in an open cell
        assert_eq!(SmallBurrowState::try_decode("...........|BACDBCD#"), None);

        // Symbol outside the alphabet
        assert_eq!(SmallBurrowState::try_decode("...........|BACDBCDE"), None);
    }

    #[test]
    fn test_population_conserved_across_moves() {
        for index in 0_usize..SMALL_BURROW_STATE_STRS.len() {
            for OpenSetElement(state, _) in moves(&small_burrow_state(index)) {
                assert!(state.is_population_valid(), "\n{}", state.as_string());
            }
        }
    }

    #[test]
    fn test_no_entry_through_blocked_hallway_or_foreign_room() {
        // The A at hallway cell 0 is walled off by the B at cell 1; the B's home room still holds
        // a D and a C. Neither may enter a room.
        let state: SmallBurrowState =
            SmallBurrowState::try_decode("AB.........|.ADCBC.D").unwrap();
        let mut entry_moves: Vec<OpenSetElement<SmallBurrowState, u32>> = Vec::new();

        state.push_room_entry_moves(&mut entry_moves);

        assert!(entry_moves.is_empty());

        // Every generated move is thus an extraction into the hallway.
        for OpenSetElement(next, _) in moves(&state) {
            assert_eq!(
                next.hallway
                    .iter()
                    .filter(|cell| cell.amphipod().is_some())
                    .count(),
                3_usize
            );
        }
    }

    #[test]
    fn test_entry_moves_suppress_exit_moves() {
        // The A at hallway cell 0 can walk home, so the extractions available from the two
        // foreign-topped rooms must not be emitted.
        let state: SmallBurrowState =
            SmallBurrowState::try_decode("A..........|.ACBBCDD").unwrap();
        let state_moves: Vec<OpenSetElement<SmallBurrowState, u32>> = moves(&state);

        assert_eq!(state_moves.len(), 1_usize);

        let OpenSetElement(next, energy) = &state_moves[0_usize];

        assert_eq!(next.encode(), "...........|AACBBCDD");
        assert_eq!(*energy, 3_u32);

        let mut exit_moves: Vec<OpenSetElement<SmallBurrowState, u32>> = Vec::new();

        state.push_room_exit_moves(&mut exit_moves);

        assert!(!exit_moves.is_empty());
    }

    #[test]
    fn test_organized_burrow_costs_zero() {
        let organized: SmallBurrowState = SmallBurrowState::ORGANIZED;

        assert_eq!(organized.try_organize(), Some((vec![organized], 0_u32)));
    }

    #[test]
    fn test_single_amphipod_one_move_from_home() {
        // The B at hallway cell 3 walks one cell right and one cell down: 2 * 10.
        let state: SmallBurrowState =
            SmallBurrowState::try_decode("...B.......|AA.BCCDD").unwrap();

        assert_eq!(state.try_organize().map(|(_, energy)| energy), Some(20_u32));
    }

    #[test]
    fn test_heuristic_is_admissible() {
        assert_eq!(SmallBurrowState::ORGANIZED.heuristic(), 0_u32);

        for index in 0_usize..SMALL_BURROW_STATE_STRS.len() {
            let state: SmallBurrowState = small_burrow_state(index);
            let (_, true_min_energy): (Vec<SmallBurrowState>, u32) =
                state.try_organize_dijkstra().unwrap();

            assert!(
                state.heuristic() <= true_min_energy,
                "heuristic {} exceeds true minimum {} for state\n{}",
                state.heuristic(),
                true_min_energy,
                state.as_string()
            );
        }
    }

    #[test]
    fn test_solution_try_from_str() {
        assert_eq!(
            Solution::try_from(SMALL_BURROW_STATE_STRS[0_usize]),
            Ok(Solution(small_burrow_state(0_usize)))
        );
    }

    #[test]
    fn test_burrow_state_as_string() {
        assert_eq!(
            small_burrow_state(0_usize).as_string(),
            concat!(
                "#############\n",
                "#...........#\n",
                "###B#C#B#D###\n",
                "  #A#D#C#A#\n",
                "  #########\n",
            )
        );
    }

    #[test]
    fn test_unfold() {
        assert_eq!(
            LargeBurrowState::from(small_burrow_state(0_usize)).encode(),
            "...........|BDDACCBDBBACDACA"
        );
    }

    #[test]
    fn test_example_min_energy() {
        assert_eq!(
            Solution(small_burrow_state(0_usize)).try_min_energy(),
            Some(EXAMPLE_MIN_ENERGY)
        );
    }

    #[test]
    fn test_example_min_energy_unfolded() {
        assert_eq!(
            Solution(small_burrow_state(0_usize)).try_min_energy_unfolded(),
            Some(EXAMPLE_MIN_ENERGY_UNFOLDED)
        );
    }

    #[test]
    fn test_tie_break_does_not_change_min_energy() {
        for tie_break in [TieBreak::EarliestFirst, TieBreak::LatestFirst] {
            assert_eq!(
                small_burrow_state(0_usize)
                    .try_organize_with_tie_break(tie_break)
                    .map(|(_, energy)| energy),
                Some(EXAMPLE_MIN_ENERGY)
            );
        }
    }
}
