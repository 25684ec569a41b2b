pub mod d400_sales_ranking;
pub mod d401_overview;
