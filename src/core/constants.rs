//! Default configuration values and fixed names used by the pipeline.

/// Default maximum depth of each regression tree (split levels below the root).
pub const DEFAULT_MAX_DEPTH: usize = 4;

/// Default maximum number of training samples a leaf may hold before the
/// tree stops splitting it.
pub const DEFAULT_MAX_LEAF_SIZE: usize = 3;

/// Default minimum decrease in impurity a split must achieve.
pub const DEFAULT_MIN_PURITY_INCREASE: f64 = 1e-7;

/// Default learning rate (shrinkage) for gradient boosting.
/// Controls the contribution of each tree to the ensemble.
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;

/// Default number of boosting stages.
pub const DEFAULT_NUM_ITERATIONS: usize = 100;

/// Default fraction of the training rows each tree is fitted on.
pub const DEFAULT_SUBSAMPLE_RATIO: f64 = 0.8;

/// Training halts when the loss changes by less than this between stages.
pub const DEFAULT_MIN_CHANGE: f64 = 1e-4;

/// Training halts when the loss drops below this value.
pub const DEFAULT_TOLERANCE: f64 = 1e-3;

/// Default fraction of the dataset assigned to the training split.
pub const DEFAULT_TRAIN_FRACTION: f64 = 0.8;

/// Default dataset input path.
pub const DATASET_FILE: &str = "dataset.csv";

/// Default loss history output path.
pub const PROGRESS_FILE: &str = "progress.csv";

/// Default residual report output path.
pub const REPORT_FILE: &str = "report.json";

/// Default model output path.
pub const MODEL_FILE: &str = "housing.model";

/// Optional configuration file read by the binary when present.
pub const CONFIG_FILE: &str = "housing.toml";

/// Name of the label column.
pub const LABEL_COLUMN: &str = "SalePrice";

/// Header of the loss history file.
pub const PROGRESS_HEADER: &str = "loss";

/// Feature columns read from the housing dataset, in sample order.
pub const HOUSING_FEATURES: [&str; 79] = [
    "MSSubClass", "MSZoning", "LotFrontage", "LotArea", "Street", "Alley",
    "LotShape", "LandContour", "Utilities", "LotConfig", "LandSlope", "Neighborhood",
    "Condition1", "Condition2", "BldgType", "HouseStyle", "OverallQual", "OverallCond",
    "YearBuilt", "YearRemodAdd", "RoofStyle", "RoofMatl", "Exterior1st", "Exterior2nd",
    "MasVnrType", "MasVnrArea", "ExterQual", "ExterCond", "Foundation", "BsmtQual",
    "BsmtCond", "BsmtExposure", "BsmtFinType1", "BsmtFinSF1", "BsmtFinType2",
    "BsmtFinSF2", "BsmtUnfSF", "TotalBsmtSF", "Heating", "HeatingQC", "CentralAir",
    "Electrical", "1stFlrSF", "2ndFlrSF", "LowQualFinSF", "GrLivArea", "BsmtFullBath",
    "BsmtHalfBath", "FullBath", "HalfBath", "BedroomAbvGr", "KitchenAbvGr", "KitchenQual",
    "TotRmsAbvGrd", "Functional", "Fireplaces", "FireplaceQu", "GarageType",
    "GarageYrBlt", "GarageFinish", "GarageCars", "GarageArea", "GarageQual",
    "GarageCond", "PavedDrive", "WoodDeckSF", "OpenPorchSF", "EnclosedPorch",
    "3SsnPorch", "ScreenPorch", "PoolArea", "PoolQC", "Fence", "MiscFeature",
    "MiscVal", "MoSold", "YrSold", "SaleType", "SaleCondition",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_feature_names_are_unique() {
        let unique: HashSet<_> = HOUSING_FEATURES.iter().collect();
        assert_eq!(unique.len(), HOUSING_FEATURES.len());
        assert!(!HOUSING_FEATURES.contains(&LABEL_COLUMN));
    }

    #[test]
    fn test_default_ranges() {
        assert!(DEFAULT_LEARNING_RATE > 0.0 && DEFAULT_LEARNING_RATE <= 1.0);
        assert!(DEFAULT_SUBSAMPLE_RATIO > 0.0 && DEFAULT_SUBSAMPLE_RATIO <= 1.0);
        assert!(DEFAULT_TRAIN_FRACTION > 0.0 && DEFAULT_TRAIN_FRACTION < 1.0);
    }
}
