// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

mod eval;
mod registry;
